pub mod backend;
pub mod dbs;
pub mod error;
pub mod repositories;

pub use backend::StorageBackend;
pub use dbs::{FileStorage, MemoryStorage};
pub use error::{PersistError, Result};
pub use repositories::{ConversationRepository, ACTIVE_CONVERSATION_KEY, CONVERSATIONS_KEY};
