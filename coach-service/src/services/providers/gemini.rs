//! Gemini AI provider implementation.
//!
//! Implements non-streaming text generation using Google's Gemini
//! `generateContent` REST endpoint.

use super::{
    FinishReason, GenerationParams, GenerationRequest, ProviderError, ProviderResponse,
    TextProvider,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Header carrying the API key, keeps the key out of logged URLs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    /// No request timeout is set; the HTTP client defaults apply.
    pub fn new(config: GeminiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base, self.config.model, method
        )
    }
}

/// Build the `generateContent` body for one request.
fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(&request.prompt)],
        }],
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part::text(&request.system_instruction)],
        }),
        generation_config: build_generation_config(&request.params),
    }
}

fn build_generation_config(params: &GenerationParams) -> Option<GenerationConfig> {
    params.temperature.map(|temperature| GenerationConfig {
        temperature: Some(temperature),
    })
}

/// Turn an upstream status and raw body into a provider result.
fn parse_response(status: StatusCode, body: &str) -> Result<ProviderResponse, ProviderError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty());

        return Err(ProviderError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    let api_response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("Failed to parse response: {}", e)))?;

    if let Some(message) = api_response.error.and_then(|e| e.message) {
        return Err(ProviderError::ApiError {
            status: status.as_u16(),
            message: Some(message),
        });
    }

    let usage = api_response.usage_metadata.unwrap_or_default();

    let Some(candidate) = api_response.candidates.into_iter().next() else {
        if let Some(reason) = api_response
            .prompt_feedback
            .and_then(|f| f.block_reason)
        {
            return Err(ProviderError::ContentFiltered(reason));
        }
        return Err(ProviderError::EmptyResult);
    };

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Complete,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => {
            FinishReason::ContentFilter
        }
        Some(_) => FinishReason::Other,
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought.unwrap_or(false))
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        if finish_reason == FinishReason::ContentFilter {
            return Err(ProviderError::ContentFiltered(
                candidate.finish_reason.unwrap_or_default(),
            ));
        }
        return Err(ProviderError::EmptyResult);
    }

    Ok(ProviderResponse {
        text,
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0),
        finish_reason,
    })
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        let body = build_request(request);
        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            instruction_len = request.system_instruction.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let result = parse_response(status, &raw);

        match &result {
            Ok(reply) => tracing::debug!(
                model = %self.config.model,
                input_tokens = reply.input_tokens,
                output_tokens = reply.output_tokens,
                finish_reason = ?reply.finish_reason,
                "Gemini API responded"
            ),
            Err(e) => tracing::warn!(
                model = %self.config.model,
                status = status.as_u16(),
                error = %e,
                "Gemini API call failed"
            ),
        }

        result
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            thought: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}
