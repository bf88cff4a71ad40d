use anyhow::Result;
use chrono::Utc;
use tokio::io::AsyncWrite;

use super::writeln;
use crate::render;
use crate::state::AppState;

pub async fn new_chat<W>(state: &AppState, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    state.engine.start_new_chat().await;
    writeln(out, "New chat. Ask a question about the rules.").await
}

pub async fn clear<W>(state: &AppState, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    state.engine.clear_chat().await;
    writeln(out, "Chat cleared. Your conversations are still in /list.").await
}

pub async fn list<W>(state: &AppState, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let conversations = state.engine.conversations().await;
    let active = state.engine.active_conversation_id().await;
    writeln(out, &render::conversation_list(&conversations, active.as_deref(), Utc::now())).await
}

/// Open the N-th conversation of the listing and replay it
pub async fn select<W>(state: &AppState, n: usize, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let Some(id) = nth_id(state, n).await else {
        return writeln(out, &format!("No conversation {}.", n)).await;
    };

    state.engine.select_conversation(Some(&id)).await;
    for message in state.engine.messages().await {
        writeln(out, &render::message(&message)).await?;
    }
    Ok(())
}

pub async fn delete<W>(state: &AppState, n: usize, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let Some(id) = nth_id(state, n).await else {
        return writeln(out, &format!("No conversation {}.", n)).await;
    };

    if state.engine.delete_conversation(&id).await {
        writeln(out, "Conversation deleted.").await
    } else {
        writeln(out, "Conversation not found.").await
    }
}

async fn nth_id(state: &AppState, n: usize) -> Option<String> {
    let conversations = state.engine.conversations().await;
    conversations.get(n.checked_sub(1)?).map(|c| c.id.clone())
}
