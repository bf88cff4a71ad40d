use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use umpire_chat::{ChatEngine, NoopAnalytics};
use umpire_cli::{
    commands::Command,
    config::Config,
    handlers::{dispatch, Flow},
    state::AppState,
};
use umpire_client::{ApiError, ChatRequest, ChatResponse, RulesApi};
use umpire_persist::MemoryStorage;
use umpire_types::{Country, DocumentStat, SourceDoc, SourceDocMetadata};

/// Answers every question the same way
struct CannedApi {
    fail: bool,
    requests: Mutex<Vec<ChatRequest>>,
}

impl CannedApi {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RulesApi for CannedApi {
    async fn chat(&self, request: ChatRequest) -> umpire_client::Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(ChatResponse {
            answer: "A green card is a two-minute suspension.".to_string(),
            standalone_query: String::new(),
            variant: "outdoor".to_string(),
            source_docs: vec![SourceDoc::new("Rule 14.3: a green card means...").with_metadata(
                SourceDocMetadata {
                    chapter: Some("Personal penalties".to_string()),
                    heading: Some("Green card".to_string()),
                    page: Some(42),
                    ..Default::default()
                },
            )],
        })
    }

    async fn health(&self) -> bool {
        true
    }

    async fn jurisdictions(&self) -> Vec<Country> {
        vec![Country {
            code: "BEL".to_string(),
            name: "Belgium".to_string(),
        }]
    }

    async fn knowledge_base(&self) -> umpire_client::Result<Vec<DocumentStat>> {
        Ok(vec![DocumentStat {
            source_file: "rules-of-hockey-2025.pdf".to_string(),
            variant: "outdoor".to_string(),
            country: String::new(),
            chunk_count: 312,
        }])
    }
}

fn app(api: Arc<CannedApi>) -> AppState {
    let config: Config = toml::from_str(
        r#"
        [ui]
        typewriter = false
        typewriter_speed_ms = 0
        "#,
    )
    .unwrap();

    let engine = ChatEngine::builder()
        .api(api)
        .storage(Arc::new(MemoryStorage::new()))
        .analytics(Arc::new(NoopAnalytics))
        .build()
        .unwrap();

    AppState::new(config, engine)
}

async fn run(state: &AppState, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let flow = dispatch(state, Command::parse(line), &mut out).await.unwrap();
    (flow, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_question_prints_answer_with_header() {
    let state = app(Arc::new(CannedApi::new(false)));

    let (flow, out) = run(&state, "How long is a green card?").await;

    assert_eq!(flow, Flow::Continue);
    assert!(out.contains("A green card is a two-minute suspension."));
    assert!(out.contains("1 source"));
    assert_eq!(state.engine.conversations().await.len(), 1);
}

#[tokio::test]
async fn test_failed_question_prints_generic_error() {
    let state = app(Arc::new(CannedApi::new(true)));

    let (_, out) = run(&state, "What is rule 13.2?").await;

    assert!(out.contains("Failed to get a response. Please try again."));
    assert_eq!(state.engine.messages().await.len(), 1);
}

#[tokio::test]
async fn test_list_select_and_delete() {
    let state = app(Arc::new(CannedApi::new(false)));
    run(&state, "First question").await;
    run(&state, "/new").await;
    run(&state, "Second question").await;

    let (_, listing) = run(&state, "/list").await;
    let first_line = listing.lines().next().unwrap();
    assert!(first_line.contains("Second question"));
    assert!(first_line.starts_with('*'));

    let (_, replay) = run(&state, "/select 2").await;
    assert!(replay.contains("You: First question"));

    let (_, out) = run(&state, "/delete 2").await;
    assert!(out.contains("Conversation deleted."));
    assert_eq!(state.engine.conversations().await.len(), 1);
    assert_eq!(state.engine.active_conversation_id().await, None);

    let (_, out) = run(&state, "/select 9").await;
    assert!(out.contains("No conversation 9."));
}

#[tokio::test]
async fn test_sources_of_an_answer() {
    let state = app(Arc::new(CannedApi::new(false)));
    run(&state, "Green card?").await;

    let (_, out) = run(&state, "/sources 1").await;
    assert!(out.contains("Personal penalties • Green card"));
    assert!(out.contains("(p. 42)"));

    let (_, out) = run(&state, "/sources 1 full").await;
    assert!(out.contains("Rule 14.3: a green card means"));

    let (_, out) = run(&state, "/sources 2").await;
    assert!(out.contains("No answer 2"));
}

#[tokio::test]
async fn test_clear_returns_to_welcome_and_keeps_history() {
    let state = app(Arc::new(CannedApi::new(false)));
    run(&state, "Green card?").await;
    assert!(state.engine.active_conversation_id().await.is_some());

    let (_, out) = run(&state, "/clear").await;
    assert!(out.contains("Chat cleared."));
    assert_eq!(state.engine.active_conversation_id().await, None);
    assert!(state.engine.messages().await.is_empty());
    assert_eq!(state.engine.conversations().await.len(), 1);
}

#[tokio::test]
async fn test_country_is_sent_with_questions() {
    let api = Arc::new(CannedApi::new(false));
    let state = app(api.clone());

    let (_, out) = run(&state, "/countries").await;
    assert!(out.contains("BEL  Belgium"));

    let (_, out) = run(&state, "/country bel").await;
    assert!(out.contains("Jurisdiction set to BEL."));
    let (_, out) = run(&state, "/country XYZ").await;
    assert!(out.contains("Unknown jurisdiction XYZ"));

    run(&state, "Is a raised ball allowed?").await;
    assert_eq!(api.requests.lock().unwrap()[0].country.as_deref(), Some("BEL"));
}

#[tokio::test]
async fn test_knowledge_base_and_suggestions() {
    let api = Arc::new(CannedApi::new(false));
    let state = app(api.clone());

    let (_, out) = run(&state, "/kb").await;
    assert!(out.contains("rules-of-hockey-2025.pdf [outdoor, international] 312 chunks"));

    let (_, out) = run(&state, "/suggest").await;
    assert!(out.contains("What is rule 13.2?"));

    run(&state, "/suggest 3").await;
    assert_eq!(
        api.requests.lock().unwrap()[0].query,
        "How long is a green card suspension?"
    );
}

#[tokio::test]
async fn test_quit_and_unknown() {
    let state = app(Arc::new(CannedApi::new(false)));

    let (_, out) = run(&state, "/dance").await;
    assert!(out.contains("Unknown command: /dance"));

    let (flow, _) = run(&state, "/quit").await;
    assert_eq!(flow, Flow::Quit);
}
