//! HTTP behaviour of the Ollama engine against a mock server

use resume_analyzer::config::EngineConfig;
use resume_analyzer::error::ResumeAnalyzerError;
use resume_analyzer::llm::{InferenceEngine, OllamaEngine};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_for(base_url: &str, timeout_secs: u64) -> OllamaEngine {
    OllamaEngine::new(&EngineConfig {
        base_url: format!("{}/", base_url),
        temperature: 0.5,
        timeout_secs,
        stop: vec!["</s>".to_string(), "Human:".to_string(), "Assistant:".to_string()],
    })
    .unwrap()
}

#[tokio::test]
async fn test_generate_sends_non_streaming_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "deepseek-coder",
            "prompt": "Analyze this",
            "stream": false,
            "options": {
                "temperature": 0.5,
                "stop": ["</s>", "Human:", "Assistant:"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "deepseek-coder",
            "response": "- Rust\n- SQL",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server.uri(), 5);
    let answer = engine.generate("deepseek-coder", "Analyze this").await.unwrap();

    assert_eq!(answer, "- Rust\n- SQL");
}

#[tokio::test]
async fn test_missing_model_maps_to_model_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "model 'deepseek-r1:1.5b' not found, try pulling it first"
        })))
        .mount(&server)
        .await;

    let engine = engine_for(&server.uri(), 5);
    let result = engine.generate("deepseek-r1:1.5b", "hi").await;

    match result {
        Err(ResumeAnalyzerError::ModelNotFound(model)) => assert_eq!(model, "deepseek-r1:1.5b"),
        other => panic!("expected ModelNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_an_inference_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("out of memory"))
        .mount(&server)
        .await;

    let engine = engine_for(&server.uri(), 5);
    let result = engine.generate("deepseek-coder", "hi").await;

    match result {
        Err(ResumeAnalyzerError::LlmInference(message)) => assert!(message.contains("out of memory")),
        other => panic!("expected LlmInference, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blank_response_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "  \n", "done": true })))
        .mount(&server)
        .await;

    let engine = engine_for(&server.uri(), 5);
    let result = engine.generate("deepseek-coder", "hi").await;

    assert!(matches!(result, Err(ResumeAnalyzerError::EmptyResponse)));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "too late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server.uri(), 1);
    let result = engine.generate("deepseek-coder", "hi").await;

    assert!(matches!(result, Err(ResumeAnalyzerError::Timeout(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let engine = engine_for(&format!("http://127.0.0.1:{}", port), 2);
    let result = engine.generate("deepseek-coder", "hi").await;

    assert!(matches!(result, Err(ResumeAnalyzerError::Network(_))));
}

#[tokio::test]
async fn test_list_local_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                { "name": "deepseek-coder:latest", "size": 776080839 },
                { "name": "llama3:8b", "size": 4661224676u64 }
            ]
        })))
        .mount(&server)
        .await;

    let engine = engine_for(&server.uri(), 5);
    let models = engine.list_local_models().await.unwrap();

    assert_eq!(models, vec!["deepseek-coder:latest".to_string(), "llama3:8b".to_string()]);
    assert!(resume_analyzer::llm::inference::is_model_installed("deepseek-coder", &models));
    assert!(!resume_analyzer::llm::inference::is_model_installed("deepseek-r1:1.5b", &models));
}
