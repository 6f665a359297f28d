//! Coach reply orchestration: persona resolution, prompt assembly and the
//! single upstream call.

use crate::config::{CoachConfig, PromptSettings};
use crate::persona::{CoachPersona, PromptPlan};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::{
    GenerationParams, GenerationRequest, ProviderError, TextProvider,
};
use service_core::error::AppError;
use std::sync::Arc;

/// Message returned for every request while no API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "API key missing.";

/// Builds prompts and relays them to the configured provider.
///
/// Created once per process and shared read-only between requests.
pub struct CoachService {
    provider: Option<Arc<dyn TextProvider>>,
    prompt: PromptSettings,
    params: GenerationParams,
}

impl CoachService {
    pub fn new(
        provider: Arc<dyn TextProvider>,
        prompt: PromptSettings,
        params: GenerationParams,
    ) -> Self {
        Self {
            provider: Some(provider),
            prompt,
            params,
        }
    }

    /// A service without credentials. Every reply fails with a configuration
    /// error and no provider is ever called.
    pub fn unconfigured(prompt: PromptSettings) -> Self {
        Self {
            provider: None,
            prompt,
            params: GenerationParams::default(),
        }
    }

    /// Build the Gemini-backed service, or the unconfigured one when
    /// `GEMINI_API_KEY` is absent.
    pub fn from_config(config: &CoachConfig) -> Result<Self, AppError> {
        let Some(api_key) = config.gemini.api_key.clone() else {
            tracing::error!("GEMINI_API_KEY is not set; generate requests will fail");
            return Ok(Self::unconfigured(config.prompt));
        };

        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key,
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
        })?;

        tracing::info!(
            model = %config.gemini.model,
            task_placement = ?config.prompt.task_placement,
            "Initialized Gemini text provider"
        );

        Ok(Self::new(
            Arc::new(provider),
            config.prompt,
            GenerationParams {
                temperature: config.gemini.temperature,
            },
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Produce the coach's reply for a validated prompt.
    pub async fn reply(
        &self,
        prompt: &str,
        coach_type: Option<&str>,
        tasks: &[String],
    ) -> Result<String, AppError> {
        let Some(provider) = &self.provider else {
            return Err(ProviderError::NotConfigured(MISSING_API_KEY_MESSAGE.to_string()).into());
        };

        let persona = CoachPersona::from_tag(coach_type);
        let plan = PromptPlan::build(persona, prompt, tasks, self.prompt.task_placement);

        tracing::info!(
            persona = %persona,
            task_count = tasks.len(),
            model = %provider.model(),
            "Generating coach reply"
        );

        let request = GenerationRequest {
            system_instruction: plan.system_instruction,
            prompt: plan.user_prompt,
            params: self.params.clone(),
        };

        let reply = provider.generate(&request).await?;
        Ok(reply.text)
    }
}
