use listing_scout::error::SynthesisError;
use listing_scout::synthesis::{prompt, SamplingOptions};
use listing_scout::{ModelTransport, OllamaTransport};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer, timeout: Duration) -> OllamaTransport {
    OllamaTransport::new(server.uri(), "mistral:latest", timeout).unwrap()
}

#[tokio::test]
async fn test_chat_request_and_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "mistral:latest",
            "stream": false,
            "options": {"num_predict": 150, "top_k": 10}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "mistral:latest",
            "message": {"role": "assistant", "content": "  {\"recommendations\": [\"Road Bike\"]}\n"},
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = prompt::build_request("red bike", &SamplingOptions::default());
    let response = transport(&server, Duration::from_secs(5))
        .complete(&request)
        .await
        .unwrap();

    assert_eq!(response.content, r#"{"recommendations": ["Road Bike"]}"#);
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let request = prompt::build_request("sofa", &SamplingOptions::default());
    let err = transport(&server, Duration::from_secs(5))
        .complete(&request)
        .await
        .unwrap_err();

    match err {
        SynthesisError::Transport(msg) => assert!(msg.contains("model not loaded")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_reply_without_message_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
        .mount(&server)
        .await;

    let request = prompt::build_request("sofa", &SamplingOptions::default());
    let err = transport(&server, Duration::from_secs(5))
        .complete(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, SynthesisError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_slow_reply_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": {"content": "{}"}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let request = prompt::build_request("sofa", &SamplingOptions::default());
    let err = transport(&server, Duration::from_millis(100))
        .complete(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, SynthesisError::Timeout(_)));
}
