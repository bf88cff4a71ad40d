use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tokio::sync::{broadcast, Mutex};
use umpire_client::{ApiError, ChatRequest, RulesApi};
use umpire_types::{ChatEvent, ChatMessage, Conversation, Country, DocumentStat, SourceDoc, Variant};

use crate::analytics::{self, AnalyticsSink};
use crate::store::ConversationStore;

/// Result of one `send_message` call
#[derive(Debug)]
pub enum SendOutcome {
    /// Blank input, nothing was sent
    Ignored,

    /// The answer was filed into the conversation captured at send time
    Answered {
        conversation_id: String,
        message_id: String,
    },

    /// The answer arrived after its conversation was deleted
    Discarded {
        conversation_id: String,
    },

    /// The request failed; the user message stays, no answer was added
    Failed {
        conversation_id: String,
        error: ApiError,
    },
}

impl SendOutcome {
    pub fn conversation_id(&self) -> Option<&str> {
        match self {
            Self::Ignored => None,
            Self::Answered { conversation_id, .. }
            | Self::Discarded { conversation_id }
            | Self::Failed { conversation_id, .. } => Some(conversation_id),
        }
    }
}

/// Point-in-time view of what a front-end should render
#[derive(Debug, Clone)]
pub struct ChatSnapshot {
    pub active_id: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub is_loading: bool,
    pub is_healthy: Option<bool>,
    /// Answer eligible for the typewriter reveal, if any
    pub fresh_message_id: Option<String>,
    pub country: Option<String>,
}

pub(crate) struct EngineState {
    pub(crate) store: ConversationStore,
    /// Loading placeholders keyed by the conversation they belong to
    in_flight: HashMap<String, Vec<ChatMessage>>,
    fresh_message_id: Option<String>,
    is_healthy: Option<bool>,
    countries: Vec<Country>,
    country: Option<String>,
}

impl EngineState {
    pub(crate) fn new(store: ConversationStore, country: Option<String>) -> Self {
        Self {
            store,
            in_flight: HashMap::new(),
            fresh_message_id: None,
            is_healthy: None,
            countries: Vec::new(),
            country,
        }
    }

    fn displayed_messages(&self) -> Vec<ChatMessage> {
        let Some(active) = self.store.active_conversation() else {
            return Vec::new();
        };
        let mut messages = active.messages.clone();
        if let Some(placeholder) = self.in_flight.get(&active.id).and_then(|p| p.last()) {
            messages.push(placeholder.clone());
        }
        messages
    }

    fn finish_turn(&mut self, conversation_id: &str, placeholder_id: &str) {
        if let Some(pending) = self.in_flight.get_mut(conversation_id) {
            pending.retain(|p| p.id != placeholder_id);
            if pending.is_empty() {
                self.in_flight.remove(conversation_id);
            }
        }
    }
}

/// Drives conversations against the rules API
///
/// Cheap to clone; clones share state. The state lock is never held across
/// the network call, so conversations can be switched while a send is in
/// flight. Each completion is applied to the conversation captured when the
/// message was sent.
#[derive(Clone)]
pub struct ChatEngine {
    api: Arc<dyn RulesApi>,
    state: Arc<Mutex<EngineState>>,
    analytics: Arc<dyn AnalyticsSink>,
    events: broadcast::Sender<ChatEvent>,
}

impl ChatEngine {
    pub(crate) fn from_parts(
        api: Arc<dyn RulesApi>,
        state: EngineState,
        analytics: Arc<dyn AnalyticsSink>,
        event_capacity: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            api,
            state: Arc::new(Mutex::new(state)),
            analytics,
            events,
        }
    }

    pub fn builder() -> crate::builder::ChatEngineBuilder {
        crate::builder::ChatEngineBuilder::new()
    }

    /// Receive events emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ChatEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Send a question and settle its turn
    pub async fn send_message(&self, query: &str) -> SendOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SendOutcome::Ignored;
        }

        let user_message = ChatMessage::user(query);
        let placeholder = ChatMessage::placeholder();

        // Capture everything the continuation needs while holding the lock
        let (conversation_id, history, country, created) = {
            let mut state = self.state.lock().await;

            let active = state
                .store
                .active_conversation()
                .map(|c| (c.id.clone(), c.messages.clone()));

            let (conversation_id, history, created) = match active {
                Some((id, prior)) => {
                    let history = prior.iter().map(ChatMessage::to_message).collect();
                    let mut messages = prior;
                    messages.push(user_message.clone());
                    state.store.update_conversation(&id, messages);
                    (id, history, false)
                }
                None => {
                    let conversation = state.store.create_conversation(user_message.clone());
                    (conversation.id, Vec::new(), true)
                }
            };

            state
                .in_flight
                .entry(conversation_id.clone())
                .or_default()
                .push(placeholder.clone());
            state.fresh_message_id = None;

            (conversation_id, history, state.country.clone(), created)
        };

        if created {
            self.emit(ChatEvent::ConversationCreated {
                conversation_id: conversation_id.clone(),
            });
        }

        tracing::info!(conversation_id = %conversation_id, "Sending question");

        let request = ChatRequest::new(query, history).with_country(country);
        let started = Instant::now();
        let result = self.api.chat(request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let mut state = self.state.lock().await;
        state.finish_turn(&conversation_id, &placeholder.id);

        match result {
            Ok(response) => {
                let variant = (!response.variant.is_empty()).then(|| Variant::from(response.variant));
                let mut answer = ChatMessage::assistant(placeholder.id.clone(), response.answer)
                    .with_standalone_query(response.standalone_query)
                    .with_source_docs(response.source_docs)
                    .with_response_time(elapsed_ms);
                if let Some(variant) = variant.clone() {
                    answer = answer.with_variant(variant);
                }

                // The answer follows its own question, even when a later send settled first
                let updated = state.store.get(&conversation_id).map(|c| {
                    let mut messages = c.messages.clone();
                    let at = messages
                        .iter()
                        .position(|m| m.id == user_message.id)
                        .map_or(messages.len(), |i| i + 1);
                    messages.insert(at, answer);
                    messages
                });

                let Some(messages) = updated else {
                    tracing::warn!(conversation_id = %conversation_id, "Answer arrived for a deleted conversation");
                    return SendOutcome::Discarded { conversation_id };
                };

                state.store.update_conversation(&conversation_id, messages);
                if state.store.active_id() == Some(conversation_id.as_str()) {
                    state.fresh_message_id = Some(placeholder.id.clone());
                }
                drop(state);

                tracing::info!(
                    conversation_id = %conversation_id,
                    elapsed_ms,
                    variant = variant.as_ref().map(Variant::as_str).unwrap_or("-"),
                    "Answer received"
                );
                analytics::fire(
                    self.analytics.as_ref(),
                    analytics::QUESTION_ASKED,
                    json!({ "variant": variant.as_ref().map(Variant::as_str) }),
                );
                self.emit(ChatEvent::MessageSettled {
                    conversation_id: conversation_id.clone(),
                    message_id: placeholder.id.clone(),
                    response_time_ms: elapsed_ms,
                });

                SendOutcome::Answered {
                    conversation_id,
                    message_id: placeholder.id,
                }
            }
            Err(error) => {
                tracing::error!(conversation_id = %conversation_id, "Chat error: {}", error);

                // The placeholder was never stored; re-save to refresh updated_at
                if let Some(messages) = state.store.get(&conversation_id).map(|c| c.messages.clone()) {
                    state.store.update_conversation(&conversation_id, messages);
                }
                drop(state);

                self.emit(ChatEvent::error(error.user_message()));

                SendOutcome::Failed {
                    conversation_id,
                    error,
                }
            }
        }
    }

    /// Messages of the active conversation, plus its placeholder if a send is in flight
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().await.displayed_messages()
    }

    pub async fn snapshot(&self) -> ChatSnapshot {
        let state = self.state.lock().await;
        ChatSnapshot {
            active_id: state.store.active_id().map(str::to_string),
            messages: state.displayed_messages(),
            is_loading: !state.in_flight.is_empty(),
            is_healthy: state.is_healthy,
            fresh_message_id: state.fresh_message_id.clone(),
            country: state.country.clone(),
        }
    }

    /// Advisory: true while any send is in flight
    pub async fn is_loading(&self) -> bool {
        !self.state.lock().await.in_flight.is_empty()
    }

    /// All conversations, most recent first
    pub async fn conversations(&self) -> Vec<Conversation> {
        self.state.lock().await.store.conversations().to_vec()
    }

    pub async fn active_conversation_id(&self) -> Option<String> {
        self.state.lock().await.store.active_id().map(str::to_string)
    }

    /// Switch the displayed conversation; `None` returns to the welcome state
    pub async fn select_conversation(&self, id: Option<&str>) {
        let mut state = self.state.lock().await;
        state.store.select_conversation(id);
        state.fresh_message_id = None;
    }

    pub async fn start_new_chat(&self) {
        self.select_conversation(None).await;
    }

    /// Same as starting a new chat; history is kept
    pub async fn clear_chat(&self) {
        self.start_new_chat().await;
    }

    pub async fn delete_conversation(&self, id: &str) -> bool {
        let removed = {
            let mut state = self.state.lock().await;
            let removed = state.store.delete_conversation(id);
            if state.store.active_id().is_none() {
                state.fresh_message_id = None;
            }
            removed
        };

        if removed {
            self.emit(ChatEvent::ConversationDeleted {
                conversation_id: id.to_string(),
            });
        }
        removed
    }

    /// Poll `/health` and remember the result
    pub async fn check_health(&self) -> bool {
        let healthy = self.api.health().await;
        if !healthy {
            tracing::warn!("Rules API reported unhealthy");
        }
        self.state.lock().await.is_healthy = Some(healthy);
        healthy
    }

    /// Fetch and cache the jurisdictions the backend supports
    pub async fn load_countries(&self) -> Vec<Country> {
        let countries = self.api.jurisdictions().await;
        self.state.lock().await.countries = countries.clone();
        countries
    }

    pub async fn countries(&self) -> Vec<Country> {
        self.state.lock().await.countries.clone()
    }

    /// Jurisdiction sent with subsequent questions
    pub async fn set_country(&self, country: Option<String>) {
        self.state.lock().await.country = country.filter(|c| !c.is_empty());
    }

    /// Indexed documents behind the assistant
    pub async fn knowledge_base(&self) -> Result<Vec<DocumentStat>, ApiError> {
        self.api.knowledge_base().await
    }

    /// Citations of a message in the active conversation
    pub async fn expand_sources(&self, message_id: &str) -> Option<Vec<SourceDoc>> {
        let docs = {
            let state = self.state.lock().await;
            state
                .store
                .active_conversation()?
                .messages
                .iter()
                .find(|m| m.id == message_id)?
                .source_docs
                .clone()?
        };
        analytics::fire(self.analytics.as_ref(), analytics::SOURCES_EXPANDED, json!({}));
        Some(docs)
    }
}
