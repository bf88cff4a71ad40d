pub mod analytics;
pub mod builder;
pub mod engine;
pub mod store;
pub mod suggestions;
pub mod typewriter;

pub use analytics::{AnalyticsSink, NoopAnalytics, TracingAnalytics};
pub use builder::ChatEngineBuilder;
pub use engine::{ChatEngine, ChatSnapshot, SendOutcome};
pub use store::ConversationStore;
pub use suggestions::{Suggestion, SUGGESTIONS};
pub use typewriter::Typewriter;

pub use umpire_types::{ChatEvent, ChatMessage, Conversation};
