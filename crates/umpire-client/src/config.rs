use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production deployment of the rules API
pub const DEFAULT_API_BASE: &str = "https://fih-rag-api-282549120912.europe-west1.run.app";

/// Connection settings for [`crate::HttpRulesClient`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as `x-api-key`; may be empty for open deployments
    #[serde(default)]
    pub api_key: String,
    /// No timeout beyond the transport default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, "")
    }
}
