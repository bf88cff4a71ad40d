use std::sync::Arc;

use umpire_chat::ChatEngine;
use crate::config::Config;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: ChatEngine,
}

impl AppState {
    pub fn new(config: Config, engine: ChatEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine,
        }
    }
}
