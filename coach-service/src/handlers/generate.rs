//! Coach reply endpoint.

use crate::models::{validation_message, GenerateRequest, GenerateResponse};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;
use validator::Validate;

/// Generate a coach reply.
///
/// POST /api/generate
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidBody(e.body_text()))?;

    req.validate()
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!(validation_message(&e))))?;

    // validate() guarantees a non-blank prompt
    let prompt = req.prompt.as_deref().unwrap_or_default();

    let text = state
        .coach
        .reply(prompt, req.coach_type(), req.tasks())
        .await?;

    Ok(Json(GenerateResponse { text }))
}

/// Any method other than POST on the generate route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed { allowed: "POST" }
}
