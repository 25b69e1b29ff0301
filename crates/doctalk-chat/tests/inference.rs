//! Wire-level tests for the HTTP inference backend.

use doctalk_chat::{HttpInferenceClient, InferenceBackend, InferenceConfig};
use doctalk_core::{DoctalkError, Fragment};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpInferenceClient {
    let mut config = InferenceConfig::new(format!("{}/generate", server.uri()));
    config.timeout_secs = 5;
    HttpInferenceClient::new(config).unwrap()
}

#[tokio::test]
async fn test_complete_sends_prompt_and_context_texts() {
    let server = MockServer::start().await;

    // The endpoint sees exactly the prompt plus the fragment texts, in order
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_json(serde_json::json!({
            "prompt": "Summarize",
            "context": ["Intro text"],
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "A summary."
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let context = vec![Fragment::new("Intro text", "report.pdf", 0)];

    let reply = client.complete("Summarize", &context).await.unwrap();

    assert_eq!(reply, "A summary.");
}

#[tokio::test]
async fn test_complete_sends_empty_context_when_no_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_json(serde_json::json!({
            "prompt": "Hello",
            "context": [],
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "Hi!"
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let reply = client.complete("Hello", &[]).await.unwrap();

    assert_eq!(reply, "Hi!");
}

#[tokio::test]
async fn test_complete_maps_http_500_to_inference_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.complete("Summarize", &[]).await.unwrap_err();

    assert!(matches!(err, DoctalkError::Inference(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_complete_rejects_payload_without_response_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "answer": "wrong field name"
            })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.complete("Summarize", &[]).await.unwrap_err();

    assert!(matches!(err, DoctalkError::Inference(_)));
    assert!(err.to_string().contains("response"));
}

#[tokio::test]
async fn test_complete_rejects_non_json_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.complete("Summarize", &[]).await.unwrap_err();

    assert!(matches!(err, DoctalkError::Inference(_)));
}

#[tokio::test]
async fn test_complete_fails_when_endpoint_unreachable() {
    let mut config = InferenceConfig::new("http://127.0.0.1:1/generate");
    config.timeout_secs = 5;
    let client = HttpInferenceClient::new(config).unwrap();

    let err = client.complete("hello", &[]).await.unwrap_err();

    assert!(matches!(err, DoctalkError::Inference(_)));
}
