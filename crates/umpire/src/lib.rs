//! # Umpire
//!
//! Client for a question-answering assistant over the rules of field hockey.
//!
//! ## Overview
//!
//! Umpire keeps a history of conversations with a remote retrieval-augmented
//! rules service:
//!
//! - **Ask questions** and get answers with cited rule-book passages
//! - **Keep conversations** across restarts (file or in-memory storage)
//! - **Switch conversations** while an answer is still on its way
//! - **Pick a jurisdiction** to get country-specific rulings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use umpire::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = Arc::new(HttpRulesClient::builder()
//!         .api_key(std::env::var("UMPIRE_API_KEY")?)
//!         .build()?);
//!
//!     let engine = ChatEngine::builder()
//!         .api(api)
//!         .storage(Arc::new(FileStorage::new(".umpire")))
//!         .build()?;
//!
//!     if let SendOutcome::Answered { .. } = engine.send_message("How long is a green card?").await {
//!         for message in engine.messages().await {
//!             println!("{}", message.content);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`umpire-types`**: messages, conversations, source documents, events
//! - **`umpire-client`**: the `RulesApi` trait and its reqwest implementation
//! - **`umpire-persist`**: storage backends and the conversation repository
//! - **`umpire-chat`**: conversation store and the send-message state machine
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use umpire_types::{
    ChatEvent, ChatMessage, Conversation, Country, DocumentStat, Message, Role, SourceDoc,
    SourceDocMetadata, Variant, format_response_time,
};

pub use umpire_client::{
    ApiError, ChatRequest, ChatResponse, ClientConfig, HttpRulesClient, HttpRulesClientBuilder,
    RulesApi, GENERIC_FAILURE_MESSAGE,
};

pub use umpire_persist::{
    ConversationRepository, FileStorage, MemoryStorage, PersistError, StorageBackend,
};

pub use umpire_chat::{
    AnalyticsSink, ChatEngine, ChatEngineBuilder, ChatSnapshot, ConversationStore, NoopAnalytics,
    SendOutcome, Suggestion, TracingAnalytics, Typewriter, SUGGESTIONS,
};
