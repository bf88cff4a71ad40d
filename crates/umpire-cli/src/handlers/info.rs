use anyhow::Result;
use tokio::io::AsyncWrite;

use umpire_chat::SUGGESTIONS;

use super::writeln;
use crate::render;
use crate::state::AppState;

pub async fn set_country<W>(state: &AppState, code: Option<String>, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let known = state.engine.countries().await;
    if let Some(code) = &code {
        if !known.is_empty() && !known.iter().any(|c| &c.code == code) {
            return writeln(out, &format!("Unknown jurisdiction {} (see /countries).", code)).await;
        }
    }

    state.engine.set_country(code.clone()).await;
    match code {
        Some(code) => writeln(out, &format!("Jurisdiction set to {}.", code)).await,
        None => writeln(out, "Jurisdiction cleared.").await,
    }
}

pub async fn countries<W>(state: &AppState, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut countries = state.engine.countries().await;
    if countries.is_empty() {
        countries = state.engine.load_countries().await;
    }
    let selected = state.engine.snapshot().await.country;
    writeln(out, &render::countries(&countries, selected.as_deref())).await
}

/// Citations of the N-th answer in the active conversation
pub async fn sources<W>(state: &AppState, n: usize, full: bool, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let messages = state.engine.messages().await;
    let answer = messages
        .iter()
        .filter(|m| !m.is_user() && !m.is_loading)
        .nth(n.saturating_sub(1));
    let Some(id) = answer.map(|m| m.id.clone()) else {
        return writeln(out, &format!("No answer {} in this conversation.", n)).await;
    };

    match state.engine.expand_sources(&id).await {
        Some(docs) if !docs.is_empty() => writeln(out, &render::sources(&docs, full)).await,
        _ => writeln(out, "This answer has no sources.").await,
    }
}

pub async fn knowledge_base<W>(state: &AppState, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    match state.engine.knowledge_base().await {
        Ok(documents) => writeln(out, &render::knowledge_base(&documents)).await,
        Err(e) => {
            tracing::error!("Failed to load knowledge base: {}", e);
            writeln(out, &format!("Error: {}", e.user_message())).await
        }
    }
}

pub async fn suggestions<W>(out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writeln(out, &render::suggestions(&SUGGESTIONS)).await
}
