//! Integration tests for the classifier gateway against a mock HTTP server.
//!
//! The contract under test: a well-formed response yields the parsed
//! categorization; any deviation degrades silently to Medium/Medium.

use mockito::{Mock, Server, ServerGuard};
use serde_json::json;

use taskwise::domain::models::{Level, TaskCategorization};
use taskwise::infrastructure::classifier::{
    ClassifierClient, ClassifierClientConfig, ClassifierGateway,
};
use taskwise::TaskClassifier;

fn gateway_for(server: &ServerGuard) -> ClassifierGateway {
    let client = ClassifierClient::new(ClassifierClientConfig {
        api_key: "test-key".to_string(),
        base_url: server.url(),
        rate_limit_rps: 1000.0,
        max_retries: 1,
        initial_backoff_ms: 10,
        max_backoff_ms: 20,
        timeout_secs: 5,
    })
    .expect("client should build");
    ClassifierGateway::new(client, "test-model")
}

fn message_body(text: &str) -> String {
    json!({
        "id": "msg_test",
        "content": [{"type": "text", "text": text}],
        "model": "test-model",
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 50, "output_tokens": 20}
    })
    .to_string()
}

async fn mock_response(server: &mut ServerGuard, text: &str) -> Mock {
    server
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(message_body(text))
        .create_async()
        .await
}

#[tokio::test]
async fn test_valid_response_is_parsed() {
    let mut server = Server::new_async().await;
    let mock = mock_response(&mut server, r#"{"impact": "High", "effort": "Low"}"#).await;

    let gateway = gateway_for(&server);
    let result = gateway.classify("Fix critical production bug").await;

    assert_eq!(result, TaskCategorization::new(Level::High, Level::Low));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_json_falls_back_to_neutral() {
    let mut server = Server::new_async().await;
    mock_response(&mut server, "I think this task is very important!").await;

    let gateway = gateway_for(&server);
    let result = gateway.classify("Some task").await;

    assert_eq!(result, TaskCategorization::neutral());
}

#[tokio::test]
async fn test_invalid_enum_falls_back_to_neutral() {
    let mut server = Server::new_async().await;
    mock_response(&mut server, r#"{"impact": "Extreme", "effort": "Low"}"#).await;

    let gateway = gateway_for(&server);
    let result = gateway.classify("Some task").await;

    assert_eq!(result, TaskCategorization::neutral());
}

#[tokio::test]
async fn test_empty_content_falls_back_to_neutral() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "msg_test",
                "content": [],
                "model": "test-model",
                "usage": {"input_tokens": 1, "output_tokens": 0}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    assert_eq!(
        gateway.classify("Some task").await,
        TaskCategorization::neutral()
    );
}

#[tokio::test]
async fn test_server_error_retries_then_falls_back() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .with_status(500)
        .with_body("internal error")
        .expect(2) // initial attempt + one retry
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let result = gateway.classify("Some task").await;

    assert_eq!(result, TaskCategorization::neutral());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_error_does_not_retry() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .with_status(401)
        .with_body("invalid api key")
        .expect(1)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let result = gateway.classify("Some task").await;

    assert_eq!(result, TaskCategorization::neutral());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_batch_parses_matching_array() {
    let mut server = Server::new_async().await;
    mock_response(
        &mut server,
        r#"[{"impact": "High", "effort": "Low"}, {"impact": "Low", "effort": "High"}]"#,
    )
    .await;

    let gateway = gateway_for(&server);
    let titles = vec!["Hotfix".to_string(), "Rewrite everything".to_string()];
    let results = gateway.classify_batch(&titles).await;

    assert_eq!(
        results,
        vec![
            TaskCategorization::new(Level::High, Level::Low),
            TaskCategorization::new(Level::Low, Level::High),
        ]
    );
}

#[tokio::test]
async fn test_batch_length_mismatch_falls_back_for_all() {
    let mut server = Server::new_async().await;
    mock_response(&mut server, r#"[{"impact": "High", "effort": "Low"}]"#).await;

    let gateway = gateway_for(&server);
    let titles = vec!["First".to_string(), "Second".to_string()];
    let results = gateway.classify_batch(&titles).await;

    assert_eq!(results, vec![TaskCategorization::neutral(); 2]);
}

#[tokio::test]
async fn test_batch_invalid_item_degrades_to_neutral() {
    let mut server = Server::new_async().await;
    mock_response(
        &mut server,
        r#"[{"impact": "High", "effort": "Low"}, {"impact": "??", "effort": "Low"}]"#,
    )
    .await;

    let gateway = gateway_for(&server);
    let titles = vec!["Good".to_string(), "Odd".to_string()];
    let results = gateway.classify_batch(&titles).await;

    assert_eq!(results[0], TaskCategorization::new(Level::High, Level::Low));
    assert_eq!(results[1], TaskCategorization::neutral());
}

#[tokio::test]
async fn test_empty_batch_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .expect(0)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.classify_batch(&[]).await.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_carries_auth_and_version_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(message_body(r#"{"impact": "Medium", "effort": "Medium"}"#))
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    gateway.classify("Check headers").await;
    mock.assert_async().await;
}
