use anyhow::Result;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::commands::{Command, HELP};
use crate::state::AppState;

pub mod chat;
pub mod conversations;
pub mod info;

/// Whether the REPL keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn dispatch<W>(state: &AppState, command: Command, out: &mut W) -> Result<Flow>
where
    W: AsyncWrite + Unpin,
{
    match command {
        Command::Ask(query) => chat::ask(state, &query, out).await?,
        Command::New => conversations::new_chat(state, out).await?,
        Command::Clear => conversations::clear(state, out).await?,
        Command::List => conversations::list(state, out).await?,
        Command::Select(n) => conversations::select(state, n, out).await?,
        Command::Delete(n) => conversations::delete(state, n, out).await?,
        Command::Country(code) => info::set_country(state, code, out).await?,
        Command::Countries => info::countries(state, out).await?,
        Command::Sources { answer, full } => info::sources(state, answer, full, out).await?,
        Command::KnowledgeBase => info::knowledge_base(state, out).await?,
        Command::Suggest(None) => info::suggestions(out).await?,
        Command::Suggest(Some(n)) => match n.checked_sub(1).and_then(|i| umpire_chat::SUGGESTIONS.get(i)) {
            Some(suggestion) => chat::ask(state, suggestion.question, out).await?,
            None => writeln(out, "No such suggestion.").await?,
        },
        Command::Help => writeln(out, HELP).await?,
        Command::Invalid(reason) => writeln(out, &format!("{} (try /help)", reason)).await?,
        Command::Empty => {}
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

pub async fn writeln<W>(out: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
