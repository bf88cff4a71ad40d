mod conversation;

pub use conversation::{ConversationRepository, ACTIVE_CONVERSATION_KEY, CONVERSATIONS_KEY};
