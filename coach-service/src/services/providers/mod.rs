//! AI provider abstractions and implementations.
//!
//! The handler only sees [`TextProvider`], so the Gemini backend can be
//! swapped for a mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Fallback message when the upstream gives no usable explanation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate content.";

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    /// Non-success HTTP status. `message` is the upstream `error.message`
    /// when the body carried one.
    #[error("API error {status}: {}", .message.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    ApiError {
        status: u16,
        message: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Upstream returned no generated text")]
    EmptyResult,

    #[error("Content filtered: {0}")]
    ContentFiltered(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            ProviderError::ApiError { status, message } => AppError::Upstream {
                message: message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
                details: Some(format!("Upstream responded with status {}", status)),
            },
            ProviderError::NetworkError(msg) => AppError::Upstream {
                message: GENERIC_FAILURE_MESSAGE.to_string(),
                details: Some(msg),
            },
            ProviderError::MalformedResponse(msg) => AppError::Upstream {
                message: GENERIC_FAILURE_MESSAGE.to_string(),
                details: Some(msg),
            },
            ProviderError::EmptyResult => AppError::Upstream {
                message: GENERIC_FAILURE_MESSAGE.to_string(),
                details: Some("Upstream returned no generated text".to_string()),
            },
            ProviderError::ContentFiltered(reason) => AppError::Upstream {
                message: GENERIC_FAILURE_MESSAGE.to_string(),
                details: Some(format!("Response blocked by safety filter: {}", reason)),
            },
        }
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text, guaranteed non-empty.
    pub text: String,

    pub input_tokens: i32,
    pub output_tokens: i32,
    pub finish_reason: FinishReason,
}

/// Generation parameters for AI requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,
}

/// One generation request: persona instruction plus user content.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub params: GenerationParams,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a single, non-streamed reply.
    async fn generate(&self, request: &GenerationRequest)
        -> Result<ProviderResponse, ProviderError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}
