use thiserror::Error;

/// What the user sees for any failed chat turn
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to get a response. Please try again.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status {
        status: u16,
        body: String,
    },

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// All runtime failures collapse to the same notification text
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
