pub mod config;
pub mod error;
pub mod http;
pub mod traits;

pub use config::{ClientConfig, DEFAULT_API_BASE};
pub use error::{ApiError, Result, GENERIC_FAILURE_MESSAGE};
pub use http::{HttpRulesClient, HttpRulesClientBuilder};
pub use traits::{ChatRequest, ChatResponse, RulesApi};
