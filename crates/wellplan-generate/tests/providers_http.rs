use std::net::TcpListener;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wellplan_generate::{
    EndpointSettings, GeminiProvider, GenerationProvider, OpenAiProvider, ProviderError,
    ProviderKind,
};

/// Base URL of a local port with nothing listening on it.
fn closed_endpoint(model: &str) -> EndpointSettings {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    EndpointSettings {
        model: Some(model.to_string()),
        base_url: Some(format!("http://{addr}")),
    }
}

fn endpoint(server: &MockServer, model: &str) -> EndpointSettings {
    EndpointSettings {
        model: Some(model.to_string()),
        base_url: Some(server.uri()),
    }
}

#[tokio::test]
async fn openai_returns_message_content_unmodified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-test"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "```json\n{\"a\":1}\n```"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        OpenAiProvider::new("sk-test", &endpoint(&server, "gpt-test"), Duration::from_secs(5))
            .expect("client");
    let text = provider.generate("make a plan").await.expect("generate");

    assert_eq!(text, "```json\n{\"a\":1}\n```");
    assert_eq!(provider.kind(), ProviderKind::OpenAi);
    assert_eq!(provider.model(), "gpt-test");
}

#[tokio::test]
async fn openai_rejected_key_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("bad", &endpoint(&server, "gpt-test"), Duration::from_secs(5))
        .expect("client");
    let err = provider.generate("make a plan").await.unwrap_err();

    assert!(matches!(err, ProviderError::Unauthorized { status: 401, .. }));
    assert_eq!(err.provider(), ProviderKind::OpenAi);
}

#[tokio::test]
async fn openai_server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("sk", &endpoint(&server, "gpt-test"), Duration::from_secs(5))
        .expect("client");
    let err = provider.generate("make a plan").await.unwrap_err();

    assert_eq!(err.code(), "provider_status");
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn openai_without_choices_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("sk", &endpoint(&server, "gpt-test"), Duration::from_secs(5))
        .expect("client");
    let err = provider.generate("make a plan").await.unwrap_err();

    assert!(matches!(err, ProviderError::EmptyResponse { .. }));
}

#[tokio::test]
async fn openai_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({"choices": []})),
        )
        .mount(&server)
        .await;

    let provider =
        OpenAiProvider::new("sk", &endpoint(&server, "gpt-test"), Duration::from_millis(200))
            .expect("client");
    let err = provider.generate("make a plan").await.unwrap_err();

    assert_eq!(err.code(), "timeout");
}

#[tokio::test]
async fn gemini_joins_candidate_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "g-test"))
        .and(body_partial_json(json!({
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"meta\":"}, {"text": "{}}"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        GeminiProvider::new("g-test", &endpoint(&server, "gemini-test"), Duration::from_secs(5))
            .expect("client");
    let text = provider.generate("make a plan").await.expect("generate");

    assert_eq!(text, "{\"meta\":{}}");
}

#[tokio::test]
async fn gemini_invalid_key_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "status": "INVALID_ARGUMENT", "details": [{"reason": "API_KEY_INVALID"}]}
        })))
        .mount(&server)
        .await;

    let provider =
        GeminiProvider::new("bad", &endpoint(&server, "gemini-test"), Duration::from_secs(5))
            .expect("client");
    let err = provider.generate("make a plan").await.unwrap_err();

    assert!(matches!(err, ProviderError::Unauthorized { status: 400, .. }));
}

#[tokio::test]
async fn gemini_without_candidates_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let provider =
        GeminiProvider::new("g", &endpoint(&server, "gemini-test"), Duration::from_secs(5))
            .expect("client");
    let err = provider.generate("make a plan").await.unwrap_err();

    assert_eq!(err.code(), "empty_response");
}

#[tokio::test]
async fn gemini_transport_error_never_exposes_key() {
    let key = "g-secret-key-123";
    let provider = GeminiProvider::new(key, &closed_endpoint("gemini-test"), Duration::from_secs(5))
        .expect("client");
    let err = provider.generate("make a plan").await.unwrap_err();

    assert_eq!(err.code(), "transport");
    assert!(!err.to_string().contains(key));
    assert!(!format!("{err:?}").contains(key));
}

#[tokio::test]
async fn openai_transport_error_never_exposes_key() {
    let key = "sk-secret-key-456";
    let provider = OpenAiProvider::new(key, &closed_endpoint("gpt-test"), Duration::from_secs(5))
        .expect("client");
    let err = provider.generate("make a plan").await.unwrap_err();

    assert_eq!(err.code(), "transport");
    assert!(!err.to_string().contains(key));
    assert!(!format!("{err:?}").contains(key));
}
