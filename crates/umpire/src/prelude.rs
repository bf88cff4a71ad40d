//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use umpire::prelude::*;
//! ```

pub use crate::{
    ChatEngine, ChatEngineBuilder, ChatEvent, ChatSnapshot, SendOutcome,
    ChatMessage, Conversation, Message, Role, SourceDoc, Variant,
    RulesApi, HttpRulesClient, ClientConfig, ApiError,
    StorageBackend, FileStorage, MemoryStorage,
    AnalyticsSink, Typewriter, SUGGESTIONS,
};
