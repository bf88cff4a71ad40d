use std::sync::Arc;

use serde_json::json;
use umpire_persist::ConversationRepository;
use umpire_types::{ChatMessage, Conversation};

use crate::analytics::{self, AnalyticsSink};

/// In-memory conversation collection backed by a repository
///
/// Conversations are kept most-recent-first. Every mutation rewrites the
/// persisted collection. The active pointer, when set, always names a
/// conversation present in the collection.
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    repository: ConversationRepository,
    analytics: Arc<dyn AnalyticsSink>,
}

impl ConversationStore {
    /// Load persisted conversations; always starts with nothing selected
    pub fn load(repository: ConversationRepository, analytics: Arc<dyn AnalyticsSink>) -> Self {
        let conversations = repository.load();
        repository.save_active_id(None);

        tracing::info!("Conversation store ready with {} conversations", conversations.len());

        Self {
            conversations,
            active_id: None,
            repository,
            analytics,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Create a conversation from its first message and make it active
    pub fn create_conversation(&mut self, first_message: ChatMessage) -> Conversation {
        let conversation = Conversation::new(first_message);
        tracing::debug!(id = %conversation.id, title = %conversation.title, "Created conversation");

        self.conversations.insert(0, conversation.clone());
        self.persist();
        self.set_active(Some(conversation.id.clone()));
        analytics::fire(self.analytics.as_ref(), analytics::CONVERSATION_CREATED, json!({}));

        conversation
    }

    /// Replace a conversation's messages; returns false if `id` is unknown
    pub fn update_conversation(&mut self, id: &str, messages: Vec<ChatMessage>) -> bool {
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) else {
            tracing::debug!(id, "Update for unknown conversation ignored");
            return false;
        };

        conversation.replace_messages(messages);
        self.persist();
        true
    }

    /// Remove a conversation, clearing the active pointer if it pointed there
    pub fn delete_conversation(&mut self, id: &str) -> bool {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != id);
        let removed = self.conversations.len() != before;

        if removed {
            self.persist();
        }
        if self.active_id.as_deref() == Some(id) {
            self.set_active(None);
        }
        analytics::fire(self.analytics.as_ref(), analytics::CONVERSATION_DELETED, json!({}));

        removed
    }

    /// Point at a conversation, or at nothing (welcome state)
    ///
    /// An id that is not in the collection selects nothing.
    pub fn select_conversation(&mut self, id: Option<&str>) {
        let next = match id {
            Some(id) if self.get(id).is_some() => Some(id.to_string()),
            Some(id) => {
                tracing::warn!(id, "Selected conversation does not exist");
                None
            }
            None => None,
        };
        self.set_active(next);
    }

    pub fn start_new_chat(&mut self) {
        self.select_conversation(None);
    }

    fn set_active(&mut self, id: Option<String>) {
        if self.active_id != id {
            self.active_id = id;
            self.repository.save_active_id(self.active_id.as_deref());
        }
    }

    fn persist(&self) {
        self.repository.save(&self.conversations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::Value;
    use std::sync::Mutex;
    use umpire_persist::{MemoryStorage, StorageBackend, ACTIVE_CONVERSATION_KEY};

    #[derive(Default)]
    struct RecordingAnalytics {
        events: Mutex<Vec<String>>,
    }

    impl AnalyticsSink for RecordingAnalytics {
        fn track(&self, event: &str, _params: Value) -> Result<()> {
            self.events.lock().unwrap().push(event.to_string());
            Ok(())
        }
    }

    struct FailingAnalytics;

    impl AnalyticsSink for FailingAnalytics {
        fn track(&self, _event: &str, _params: Value) -> Result<()> {
            anyhow::bail!("sink offline")
        }
    }

    fn store_with(storage: Arc<MemoryStorage>) -> (ConversationStore, Arc<RecordingAnalytics>) {
        let analytics = Arc::new(RecordingAnalytics::default());
        let store = ConversationStore::load(ConversationRepository::new(storage), analytics.clone());
        (store, analytics)
    }

    #[test]
    fn test_create_inserts_first_and_activates() {
        let (mut store, analytics) = store_with(Arc::new(MemoryStorage::new()));

        let first = store.create_conversation(ChatMessage::user("First"));
        let second = store.create_conversation(ChatMessage::user("Second"));

        assert_eq!(store.conversations()[0].id, second.id);
        assert_eq!(store.conversations()[1].id, first.id);
        assert_eq!(store.active_id(), Some(second.id.as_str()));
        assert_eq!(
            *analytics.events.lock().unwrap(),
            vec!["conversation_created", "conversation_created"]
        );
    }

    #[test]
    fn test_update_filters_placeholder_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let (mut store, _) = store_with(storage.clone());
        let conv = store.create_conversation(ChatMessage::user("Hi"));

        let mut messages = conv.messages.clone();
        messages.push(ChatMessage::placeholder());
        assert!(store.update_conversation(&conv.id, messages));

        assert_eq!(store.get(&conv.id).unwrap().messages.len(), 1);
        let reloaded = ConversationRepository::new(storage).load();
        assert_eq!(reloaded[0].messages.len(), 1);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let (mut store, _) = store_with(Arc::new(MemoryStorage::new()));
        assert!(!store.update_conversation("missing", vec![ChatMessage::user("x")]));
        assert!(store.conversations().is_empty());
    }

    #[test]
    fn test_delete_active_clears_pointer() {
        let (mut store, analytics) = store_with(Arc::new(MemoryStorage::new()));
        let conv = store.create_conversation(ChatMessage::user("Only"));

        assert!(store.delete_conversation(&conv.id));

        assert_eq!(store.active_id(), None);
        assert!(store.conversations().is_empty());
        assert_eq!(analytics.events.lock().unwrap().last().map(String::as_str), Some("conversation_deleted"));
    }

    #[test]
    fn test_delete_inactive_keeps_pointer() {
        let (mut store, _) = store_with(Arc::new(MemoryStorage::new()));
        let a = store.create_conversation(ChatMessage::user("A"));
        let b = store.create_conversation(ChatMessage::user("B"));

        store.delete_conversation(&a.id);

        assert_eq!(store.active_id(), Some(b.id.as_str()));
        assert_eq!(store.conversations().len(), 1);
    }

    #[test]
    fn test_select_unknown_selects_nothing() {
        let (mut store, _) = store_with(Arc::new(MemoryStorage::new()));
        store.create_conversation(ChatMessage::user("A"));

        store.select_conversation(Some("nope"));
        assert_eq!(store.active_id(), None);
        assert!(store.active_conversation().is_none());
    }

    #[test]
    fn test_startup_ignores_persisted_active_id() {
        let storage = Arc::new(MemoryStorage::new());
        let id = {
            let (mut store, _) = store_with(storage.clone());
            store.create_conversation(ChatMessage::user("A")).id
        };
        assert_eq!(storage.get(ACTIVE_CONVERSATION_KEY).unwrap(), Some(id));

        let (store, _) = store_with(storage.clone());
        assert_eq!(store.conversations().len(), 1);
        assert_eq!(store.active_id(), None);
        assert_eq!(storage.get(ACTIVE_CONVERSATION_KEY).unwrap(), None);
    }

    #[test]
    fn test_analytics_failures_are_ignored() {
        let repository = ConversationRepository::new(Arc::new(MemoryStorage::new()));
        let mut store = ConversationStore::load(repository, Arc::new(FailingAnalytics));

        let conv = store.create_conversation(ChatMessage::user("A"));
        assert!(store.delete_conversation(&conv.id));
    }

    #[test]
    fn test_start_new_chat() {
        let (mut store, _) = store_with(Arc::new(MemoryStorage::new()));
        store.create_conversation(ChatMessage::user("A"));
        store.start_new_chat();
        assert_eq!(store.active_id(), None);
    }
}
