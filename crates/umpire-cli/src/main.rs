use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use umpire_chat::{ChatEngine, ChatEvent, TracingAnalytics};
use umpire_cli::{
    commands::Command,
    config::Config,
    handlers::{self, Flow},
    render,
    state::AppState,
};
use umpire_client::{HttpRulesClient, RulesApi};
use umpire_persist::FileStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Umpire");
    tracing::info!("Rules API: {}", config.api.base_url);
    if config.api_key.is_empty() {
        tracing::warn!("UMPIRE_API_KEY is not set; requests will be sent without an API key");
    }

    let api: Arc<dyn RulesApi> = Arc::new(
        HttpRulesClient::new(config.client_config())
            .context("Failed to create rules API client")?,
    );

    tracing::info!("Storing conversations in {}", config.storage.dir.display());
    let engine = ChatEngine::builder()
        .api(api)
        .storage(Arc::new(FileStorage::new(&config.storage.dir)))
        .analytics(Arc::new(TracingAnalytics))
        .country(config.ui.country.clone())
        .build()?;

    spawn_event_logger(&engine);

    let state = AppState::new(config, engine);
    let mut stdout = tokio::io::stdout();

    if !state.engine.check_health().await {
        handlers::writeln(&mut stdout, "Warning: the rules service is not reachable right now.").await?;
    }
    state.engine.load_countries().await;

    handlers::writeln(&mut stdout, "Umpire: ask anything about the rules of hockey.").await?;
    handlers::writeln(&mut stdout, &render::suggestions(&umpire_chat::SUGGESTIONS)).await?;
    handlers::writeln(&mut stdout, "Type /help for commands.").await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        if handlers::dispatch(&state, Command::parse(&line), &mut stdout).await? == Flow::Quit {
            break;
        }
    }

    tracing::info!("Bye");
    Ok(())
}

fn spawn_event_logger(engine: &ChatEngine) {
    let mut events = engine.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ChatEvent::Notification { title, description } => {
                    tracing::warn!("{}: {}", title, description);
                }
                other => tracing::debug!(?other, "chat event"),
            }
        }
    });
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout belongs to the conversation
    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
