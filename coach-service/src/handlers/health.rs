use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Health check endpoint for Docker/K8s liveness probes.
///
/// Never calls the upstream API; `upstreamConfigured` only reports whether an
/// API key was present at startup.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "coach-service",
            "version": env!("CARGO_PKG_VERSION"),
            "upstreamConfigured": state.coach.is_configured(),
        })),
    )
}
