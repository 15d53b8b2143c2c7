use httpmock::prelude::*;
use math_agent_core::{Config, GeminiClient, SolveError, Solver, TextGenerator};
use serde_json::json;
use std::sync::Arc;

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn config_for(server: &MockServer, api_key: Option<&str>) -> Config {
    Config {
        gemini_api_key: api_key.map(str::to_string),
        api_base_url: server.base_url(),
        ..Config::default()
    }
}

#[tokio::test]
async fn sends_templated_prompt_and_returns_text() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GENERATE_PATH)
                .header("x-goog-api-key", "test-key")
                .json_body(json!({
                    "contents": [{
                        "parts": [{
                            "text": "You are a helpful math expert. Solve or explain this:\nSolve x^2 + 2x + 1 = 0"
                        }]
                    }]
                }));
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "x = -1 (double root)" }]
                    },
                    "finishReason": "STOP"
                }]
            }));
        })
        .await;

    let solver = Solver::from_config(&config_for(&server, Some("test-key")));
    let answer = solver.solve("Solve x^2 + 2x + 1 = 0").await.unwrap();

    assert_eq!(answer, "x = -1 (double root)");
    api_mock.assert_async().await;
}

#[tokio::test]
async fn joins_multiple_parts_of_first_candidate() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(200).json_body(json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "### Step 1\n" }, { "text": "x = 2" }] } },
                    { "content": { "parts": [{ "text": "ignored" }] } }
                ]
            }));
        })
        .await;

    let client = GeminiClient::new(&config_for(&server, Some("k")));
    assert_eq!(client.generate("2x = 4").await.unwrap(), "### Step 1\nx = 2");
}

#[tokio::test]
async fn missing_key_fails_without_network_call() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(200);
        })
        .await;

    let solver = Solver::new(Arc::new(GeminiClient::new(&config_for(&server, None))));
    let err = solver.solve("1 + 1").await.unwrap_err();

    assert!(matches!(err, SolveError::MissingApiKey));
    assert_eq!(api_mock.hits_async().await, 0);
}

#[tokio::test]
async fn service_error_message_is_extracted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(400).json_body(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            }));
        })
        .await;

    let client = GeminiClient::new(&config_for(&server, Some("bad")));
    match client.generate("1 + 1").await {
        Err(SolveError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid. Please pass a valid API key.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept_raw() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(503).body("upstream unavailable");
        })
        .await;

    let client = GeminiClient::new(&config_for(&server, Some("k")));
    let err = client.generate("1 + 1").await.unwrap_err();
    assert_eq!(err.to_string(), "AI service error 503: upstream unavailable");
}

#[tokio::test]
async fn no_candidates_is_an_empty_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(200).json_body(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            }));
        })
        .await;

    let client = GeminiClient::new(&config_for(&server, Some("k")));
    assert!(matches!(
        client.generate("1 + 1").await,
        Err(SolveError::EmptyResponse)
    ));
}

#[tokio::test]
async fn unreachable_service_is_an_http_error() {
    let config = Config {
        gemini_api_key: Some("k".to_string()),
        // Port 9 (discard) is essentially never listening locally.
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    };

    let err = GeminiClient::new(&config).generate("1 + 1").await.unwrap_err();
    assert!(matches!(err, SolveError::Http(_)));
}
