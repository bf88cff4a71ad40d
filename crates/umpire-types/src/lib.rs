pub mod message;
pub mod source;
pub mod conversation;
pub mod events;

pub use message::{ChatMessage, Message, Role, format_response_time};
pub use source::{Country, DocumentStat, SourceDoc, SourceDocMetadata, Variant};
pub use conversation::{Conversation, derive_title, TITLE_MAX_CHARS};
pub use events::ChatEvent;
