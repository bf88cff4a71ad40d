use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::source::{SourceDoc, Variant};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Role + content pair, the shape the backend accepts as history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A message as displayed and persisted by the client
///
/// Field names on the wire follow the storage layout used by earlier
/// releases of the web client, so existing histories keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standalone_query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_docs: Option<Vec<SourceDoc>>,

    /// Only ever true for the in-flight assistant placeholder
    #[serde(rename = "isLoading", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_loading: bool,

    #[serde(rename = "responseTime", default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ChatMessage {
    fn new(role: Role, content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: Utc::now(),
            standalone_query: None,
            variant: None,
            source_docs: None,
            is_loading: false,
            response_time_ms: None,
        }
    }

    /// Create a user message with a fresh id
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into())
    }

    /// Create an empty assistant message marked as loading
    pub fn placeholder() -> Self {
        let mut msg = Self::new(Role::Assistant, String::new());
        msg.is_loading = true;
        msg
    }

    /// Create a finalized assistant message reusing the placeholder's id
    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        let mut msg = Self::new(Role::Assistant, content.into());
        msg.id = id.into();
        msg
    }

    pub fn with_standalone_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.standalone_query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_source_docs(mut self, docs: Vec<SourceDoc>) -> Self {
        self.source_docs = Some(docs);
        self
    }

    pub fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn source_count(&self) -> usize {
        self.source_docs.as_ref().map_or(0, Vec::len)
    }

    /// Project onto the role/content pair sent as history
    pub fn to_message(&self) -> Message {
        Message {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// Render a response time the way the debug trace shows it
pub fn format_response_time(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}
