use mockito::Matcher;
use serde_json::json;
use umpire_client::{ApiError, ChatRequest, HttpRulesClient, RulesApi};
use umpire_types::Message;

fn client_for(server: &mockito::ServerGuard) -> HttpRulesClient {
    HttpRulesClient::builder()
        .base_url(server.url())
        .api_key("test-key")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_chat_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_header("x-api-key", "test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "query": "What is rule 13.2?",
            "history": []
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "answer": "Rule 13.2 covers penalty corners.",
                "standalone_query": "What is rule 13.2?",
                "variant": "outdoor",
                "source_docs": [
                    {"page_content": "13.2 ...", "metadata": {"page": 40, "rule_number": "13.2"}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .chat(ChatRequest::new("What is rule 13.2?", vec![]))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.answer, "Rule 13.2 covers penalty corners.");
    assert_eq!(response.variant, "outdoor");
    assert_eq!(response.source_docs.len(), 1);
    assert_eq!(response.source_docs[0].metadata.page, Some(40));
}

#[tokio::test]
async fn test_chat_sends_history_and_country() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({
            "query": "And indoors?",
            "history": [
                {"role": "user", "content": "How long is a green card?"},
                {"role": "assistant", "content": "Two minutes."}
            ],
            "country": "BEL"
        })))
        .with_status(200)
        .with_body(json!({"answer": "One minute.", "standalone_query": "", "variant": "indoor", "source_docs": []}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let history = vec![
        Message::user("How long is a green card?"),
        Message::assistant("Two minutes."),
    ];
    let request = ChatRequest::new("And indoors?", history).with_country(Some("BEL".to_string()));
    let response = client.chat(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.answer, "One minute.");
}

#[tokio::test]
async fn test_chat_server_error_maps_to_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(500)
        .with_body(json!({"error": "Internal server error"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .chat(ChatRequest::new("What is rule 13.2?", vec![]))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal server error"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_chat_malformed_body_maps_to_decode() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .chat(ChatRequest::new("What is rule 13.2?", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.user_message(), "Failed to get a response. Please try again.");
}

#[tokio::test]
async fn test_chat_unreachable_host_maps_to_transport() {
    let client = HttpRulesClient::builder()
        .base_url("http://127.0.0.1:1")
        .api_key("test-key")
        .build()
        .unwrap();

    let err = client
        .chat(ChatRequest::new("What is rule 13.2?", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_health() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(json!({"status": "ok"}).to_string())
        .create_async()
        .await;

    assert!(client_for(&server).health().await);
}

#[tokio::test]
async fn test_health_unhealthy_on_503() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(503)
        .create_async()
        .await;

    assert!(!client_for(&server).health().await);
}

#[tokio::test]
async fn test_health_unhealthy_when_unreachable() {
    let client = HttpRulesClient::builder()
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    assert!(!client.health().await);
}

#[tokio::test]
async fn test_jurisdictions() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/jurisdictions")
        .with_status(200)
        .with_body(
            json!([
                {"code": "BEL", "name": "Belgium"},
                {"code": "NLD", "name": "Netherlands"},
                {"code": "DEU", "name": "Germany"}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let countries = client_for(&server).jurisdictions().await;
    assert_eq!(countries.len(), 3);
    assert_eq!(countries[0].code, "BEL");
    assert_eq!(countries[2].name, "Germany");
}

#[tokio::test]
async fn test_jurisdictions_degrade_to_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/jurisdictions")
        .with_status(500)
        .create_async()
        .await;

    assert!(client_for(&server).jurisdictions().await.is_empty());
}

#[tokio::test]
async fn test_knowledge_base() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/knowledge-base")
        .with_status(200)
        .with_body(
            json!([
                {"source_file": "rules-outdoor-2025.pdf", "variant": "outdoor", "country": "", "chunk_count": 312},
                {"source_file": "kbhb-indoor.pdf", "variant": "indoor", "country": "BEL", "chunk_count": 48}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let docs = client_for(&server).knowledge_base().await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1].country, "BEL");
    assert_eq!(docs[0].chunk_count, 312);
}
