use anyhow::Result;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use umpire_chat::{SendOutcome, Typewriter};
use umpire_types::ChatMessage;

use super::writeln;
use crate::render;
use crate::state::AppState;

/// Send a question and print the settled turn
pub async fn ask<W>(state: &AppState, query: &str, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writeln(out, "Umpire: thinking...").await?;

    let outcome = state.engine.send_message(query).await;
    if let Some(id) = outcome.conversation_id() {
        tracing::debug!(conversation_id = id, "Turn settled");
    }

    match outcome {
        SendOutcome::Ignored => {}
        SendOutcome::Answered { message_id, .. } => {
            let snapshot = state.engine.snapshot().await;
            let Some(answer) = snapshot.messages.iter().find(|m| m.id == message_id) else {
                return Ok(());
            };
            let fresh = snapshot.fresh_message_id.as_deref() == Some(message_id.as_str());
            reveal(state, answer, fresh, out).await?;
        }
        SendOutcome::Discarded { .. } => {
            writeln(out, "The conversation was deleted before the answer arrived.").await?;
        }
        SendOutcome::Failed { error, .. } => {
            writeln(out, &format!("Error: {}", error.user_message())).await?;
        }
    }
    Ok(())
}

/// Print an answer, typing it out when it just arrived
async fn reveal<W>(state: &AppState, answer: &ChatMessage, fresh: bool, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writeln(out, &render::answer_header(answer)).await?;

    let ui = &state.config.ui;
    let typewriter = Typewriter::new(answer.content.as_str())
        .enabled(fresh && ui.typewriter)
        .with_speed(ui.typewriter_speed());
    let speed = typewriter.speed();

    let mut shown = 0;
    for frame in typewriter {
        out.write_all(frame[shown..].as_bytes()).await?;
        out.flush().await?;
        shown = frame.len();
        if !speed.is_zero() {
            tokio::time::sleep(speed).await;
        }
    }
    out.write_all(b"\n").await?;
    out.flush().await?;

    if answer.source_count() > 0 {
        writeln(out, "(use /sources N to see the citations)").await?;
    }
    Ok(())
}
