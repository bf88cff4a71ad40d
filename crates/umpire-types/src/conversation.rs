use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// Titles longer than this are cut and suffixed with "..."
pub const TITLE_MAX_CHARS: usize = 50;

/// Derive a conversation title from its first message
pub fn derive_title(first_message: &str) -> String {
    if first_message.chars().count() > TITLE_MAX_CHARS {
        let mut title: String = first_message.chars().take(TITLE_MAX_CHARS).collect();
        title.push_str("...");
        title
    } else {
        first_message.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Start a conversation seeded with its first message
    pub fn new(first_message: ChatMessage) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: derive_title(&first_message.content),
            messages: vec![first_message],
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the message list, dropping any loading placeholder
    pub fn replace_messages(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages.into_iter().filter(|m| !m.is_loading).collect();
        self.updated_at = Utc::now();
    }

    /// Copy of this conversation without loading placeholders
    pub fn without_placeholders(&self) -> Self {
        Self {
            messages: self.messages.iter().filter(|m| !m.is_loading).cloned().collect(),
            ..self.clone()
        }
    }
}
