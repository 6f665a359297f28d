//! End-to-end tests: the running application talks to a local stand-in for
//! the Gemini API.

mod common;

use axum::http::StatusCode;
use coach_service::persona::CoachPersona;
use coach_service::startup::Application;
use common::{candidate_reply, test_config, StubUpstream};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Spawn the application against `stub` and return its base URL.
async fn spawn_app(stub: &StubUpstream, api_key: Option<&str>, extra: &[(&str, &str)]) -> String {
    let config = test_config(&stub.base_url, api_key, extra);
    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    format!("http://127.0.0.1:{}", port)
}

async fn post_generate(base: &str, body: Value) -> (u16, Value) {
    let response = Client::new()
        .post(format!("{}/api/generate", base))
        .json(&body)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    let status = response.status().as_u16();
    let body = response.json().await.expect("Failed to parse JSON");
    (status, body)
}

#[tokio::test]
async fn energizer_request_reaches_upstream_verbatim() {
    let stub = StubUpstream::replying("Let's go!").await;
    let base = spawn_app(&stub, Some("test-api-key"), &[]).await;

    let (status, body) = post_generate(
        &base,
        json!({ "prompt": "How do I start running?", "coachType": "energizer" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "text": "Let's go!" }));

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.path, "/v1beta/models/gemini-2.5-flash:generateContent");
    assert_eq!(call.api_key.as_deref(), Some("test-api-key"));
    assert_eq!(
        call.body["systemInstruction"]["parts"][0]["text"],
        CoachPersona::Energizer.instruction()
    );
    assert_eq!(call.body["contents"][0]["role"], "user");
    assert_eq!(
        call.body["contents"][0]["parts"][0]["text"],
        "How do I start running?"
    );
    assert!(call.body.get("generationConfig").is_none());
}

#[tokio::test]
async fn plan_my_week_sends_numbered_tasks() {
    let stub = StubUpstream::replying("Monday: groceries").await;
    let base = spawn_app(&stub, Some("test-api-key"), &[("GEMINI_TEMPERATURE", "0.5")]).await;

    let (status, _) = post_generate(
        &base,
        json!({ "prompt": "Plan my week", "tasks": ["Buy groceries", "Call dentist"] }),
    )
    .await;
    assert_eq!(status, 200);

    let call = &stub.calls()[0];
    let instruction = call.body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    let first = instruction.find("1. Buy groceries").expect("first task");
    let second = instruction.find("2. Call dentist").expect("second task");
    assert!(first < second);
    assert_eq!(call.body["contents"][0]["parts"][0]["text"], "Plan my week");
    assert_eq!(call.body["generationConfig"]["temperature"], json!(0.5));
}

#[tokio::test]
async fn missing_api_key_never_reaches_upstream() {
    let stub = StubUpstream::replying("should not be used").await;
    let base = spawn_app(&stub, None, &[]).await;

    for _ in 0..2 {
        let (status, body) =
            post_generate(&base, json!({ "prompt": "How do I start running?" })).await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], "Server configuration error: API key missing.");
    }

    assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn no_candidates_is_server_error() {
    let stub = StubUpstream::spawn(StatusCode::OK, json!({ "candidates": [] })).await;
    let base = spawn_app(&stub, Some("test-api-key"), &[]).await;

    let (status, body) = post_generate(&base, json!({ "prompt": "Hi" })).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to generate content.");
    assert!(body.get("text").is_none());
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn empty_text_is_server_error() {
    let stub = StubUpstream::spawn(StatusCode::OK, candidate_reply("")).await;
    let base = spawn_app(&stub, Some("test-api-key"), &[]).await;

    let (status, body) = post_generate(&base, json!({ "prompt": "Hi" })).await;

    assert_eq!(status, 500);
    assert!(body["error"].is_string());
    assert!(body.get("text").is_none());
}

#[tokio::test]
async fn upstream_error_message_is_surfaced() {
    let stub = StubUpstream::spawn(
        StatusCode::BAD_REQUEST,
        json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }),
    )
    .await;
    let base = spawn_app(&stub, Some("bad-key"), &[]).await;

    let (status, body) = post_generate(&base, json!({ "prompt": "Hi" })).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "API key not valid. Please pass a valid API key.");
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn unreachable_upstream_is_server_error() {
    let config = test_config("http://127.0.0.1:1/v1beta", Some("test-api-key"), &[]);
    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let base = format!("http://127.0.0.1:{}", app.port());
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    let (status, body) = post_generate(&base, json!({ "prompt": "Hi" })).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to generate content.");
}
