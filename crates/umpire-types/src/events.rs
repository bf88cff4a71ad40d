use serde::{Deserialize, Serialize};

/// Events emitted by the chat engine for front-ends to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A conversation was created lazily by the first send
    ConversationCreated {
        conversation_id: String,
    },

    /// A conversation was removed by the user
    ConversationDeleted {
        conversation_id: String,
    },

    /// An answer replaced its loading placeholder
    MessageSettled {
        conversation_id: String,
        message_id: String,
        response_time_ms: u64,
    },

    /// User-facing notification (errors)
    Notification {
        title: String,
        description: String,
    },
}

impl ChatEvent {
    pub fn error(description: impl Into<String>) -> Self {
        Self::Notification {
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}
