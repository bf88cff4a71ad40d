use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use umpire_types::{Country, DocumentStat, Message, SourceDoc};

use crate::error::Result;

/// Remote rules assistant
///
/// `health` and `jurisdictions` never fail: they degrade to "unhealthy" and
/// "no jurisdictions" respectively.
#[async_trait]
pub trait RulesApi: Send + Sync {
    /// Ask a question (`POST /chat`)
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// `GET /health`; any failure means unhealthy
    async fn health(&self) -> bool;

    /// `GET /jurisdictions`; any failure yields an empty list
    async fn jurisdictions(&self) -> Vec<Country>;

    /// `GET /knowledge-base`, the list of indexed documents
    async fn knowledge_base(&self) -> Result<Vec<DocumentStat>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub history: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ChatRequest {
    pub fn new(query: impl Into<String>, history: Vec<Message>) -> Self {
        Self {
            query: query.into(),
            history,
            country: None,
        }
    }

    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country.filter(|c| !c.is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub standalone_query: String,
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub source_docs: Vec<SourceDoc>,
}
