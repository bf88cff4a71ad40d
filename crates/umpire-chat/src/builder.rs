use std::sync::Arc;
use anyhow::{Result, anyhow};

use umpire_client::RulesApi;
use umpire_persist::{ConversationRepository, MemoryStorage, StorageBackend};

use crate::analytics::{AnalyticsSink, TracingAnalytics};
use crate::engine::{ChatEngine, EngineState};
use crate::store::ConversationStore;

const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Builder for constructing a ChatEngine with optional components
pub struct ChatEngineBuilder {
    api: Option<Arc<dyn RulesApi>>,
    storage: Option<Arc<dyn StorageBackend>>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    country: Option<String>,
    event_capacity: usize,
}

impl ChatEngineBuilder {
    pub fn new() -> Self {
        Self {
            api: None,
            storage: None,
            analytics: None,
            country: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Set the rules API client
    pub fn api(mut self, api: Arc<dyn RulesApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Set the storage backend conversations are persisted to
    pub fn storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Initial jurisdiction; empty means none
    pub fn country(mut self, country: impl Into<String>) -> Self {
        let country = country.into();
        self.country = (!country.is_empty()).then_some(country);
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Build the ChatEngine, loading persisted conversations
    pub fn build(self) -> Result<ChatEngine> {
        let api = self.api
            .ok_or_else(|| anyhow!("Rules API client is required"))?;

        let storage = self.storage.unwrap_or_else(|| {
            tracing::warn!("No storage configured, conversations will not survive a restart");
            Arc::new(MemoryStorage::new())
        });
        let analytics = self.analytics
            .unwrap_or_else(|| Arc::new(TracingAnalytics));

        let store = ConversationStore::load(ConversationRepository::new(storage), analytics.clone());

        Ok(ChatEngine::from_parts(
            api,
            EngineState::new(store, self.country),
            analytics,
            self.event_capacity,
        ))
    }
}

impl Default for ChatEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
