//! Test helpers for coach-service integration tests.
//!
//! Provides a local stand-in for the Gemini API that records every call.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    Json, Router,
};
use coach_service::config::CoachConfig;
use serde_json::{json, Value};
use service_core::config::Config;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// One request received by the stub upstream.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    hits: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    status: StatusCode,
    reply: Value,
}

/// Handle on a running stub upstream.
pub struct StubUpstream {
    pub base_url: String,
    state: StubState,
}

impl StubUpstream {
    /// Start a stub answering every request with `status` and `reply`.
    pub async fn spawn(status: StatusCode, reply: Value) -> Self {
        let state = StubState {
            hits: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            status,
            reply,
        };

        let router = Router::new()
            .fallback(record_call)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/v1beta", port),
            state,
        }
    }

    /// Stub returning a single candidate with `text`.
    pub async fn replying(text: &str) -> Self {
        Self::spawn(StatusCode::OK, candidate_reply(text)).await
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }
}

async fn record_call(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.calls.lock().unwrap().push(RecordedCall {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    (state.status, Json(state.reply.clone()))
}

/// Gemini-shaped success body.
pub fn candidate_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 2 }
    })
}

/// Service configuration pointing at `api_base`, on a random port.
pub fn test_config(api_base: &str, api_key: Option<&str>, extra: &[(&str, &str)]) -> CoachConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("GEMINI_API_BASE".to_string(), api_base.to_string());
    if let Some(key) = api_key {
        vars.insert("GEMINI_API_KEY".to_string(), key.to_string());
    }
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }

    let common = Config {
        port: 0,
        log_level: "info".to_string(),
    };

    CoachConfig::from_lookup(common, |k| vars.get(k).cloned()).expect("Failed to build config")
}
