use std::sync::Arc;

use umpire_types::Conversation;

use crate::backend::StorageBackend;
use crate::error::Result;

/// Key holding the JSON array of conversations
pub const CONVERSATIONS_KEY: &str = "fih-rules-conversations";

/// Key holding the id of the last active conversation, absent when none
pub const ACTIVE_CONVERSATION_KEY: &str = "fih-rules-active-conversation";

/// Reads and writes the conversation collection
///
/// The plain `load`/`save` methods never fail: read problems degrade to an
/// empty history and write problems are logged. The `try_*` variants expose
/// the underlying error.
#[derive(Clone)]
pub struct ConversationRepository {
    backend: Arc<dyn StorageBackend>,
}

impl ConversationRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Load all conversations
    pub fn try_load(&self) -> Result<Vec<Conversation>> {
        match self.backend.get(CONVERSATIONS_KEY)? {
            Some(stored) => Ok(serde_json::from_str(&stored)?),
            None => Ok(Vec::new()),
        }
    }

    /// Load all conversations, treating any failure as "no data"
    pub fn load(&self) -> Vec<Conversation> {
        match self.try_load() {
            Ok(conversations) => {
                tracing::debug!("Loaded {} conversations", conversations.len());
                conversations
            }
            Err(e) => {
                tracing::error!("Failed to load conversations: {}", e);
                Vec::new()
            }
        }
    }

    /// Write the full collection, without loading placeholders
    pub fn try_save(&self, conversations: &[Conversation]) -> Result<()> {
        let to_save: Vec<Conversation> = conversations
            .iter()
            .map(Conversation::without_placeholders)
            .collect();
        let json = serde_json::to_string(&to_save)?;
        self.backend.set(CONVERSATIONS_KEY, &json)
    }

    pub fn save(&self, conversations: &[Conversation]) {
        if let Err(e) = self.try_save(conversations) {
            tracing::error!("Failed to save conversations: {}", e);
        }
    }

    pub fn load_active_id(&self) -> Option<String> {
        match self.backend.get(ACTIVE_CONVERSATION_KEY) {
            Ok(id) => id.filter(|id| !id.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to load active conversation id: {}", e);
                None
            }
        }
    }

    /// Store the active id, or remove the key when there is none
    pub fn save_active_id(&self, id: Option<&str>) {
        let result = match id {
            Some(id) => self.backend.set(ACTIVE_CONVERSATION_KEY, id),
            None => self.backend.remove(ACTIVE_CONVERSATION_KEY),
        };
        if let Err(e) = result {
            tracing::error!("Failed to save active conversation id: {}", e);
        }
    }
}
