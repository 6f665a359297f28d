use crate::persona::TaskPlacement;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default Gemini model used for coach replies.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Gemini REST API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const MIN_TEMPERATURE: f32 = 0.0;
const MAX_TEMPERATURE: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct CoachConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub prompt: PromptSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// `None` when `GEMINI_API_KEY` is unset or empty. The service still
    /// starts; every generate request then fails with a configuration error.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptSettings {
    pub task_placement: TaskPlacement,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            temperature: None,
        }
    }
}

impl CoachConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service settings from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Secret::new);

        let temperature = match lookup("GEMINI_TEMPERATURE") {
            Some(raw) => Some(parse_temperature(&raw)?),
            None => None,
        };

        let task_placement = match lookup("COACH_TASK_PLACEMENT") {
            Some(raw) => raw.parse().map_err(AppError::ConfigError)?,
            None => TaskPlacement::default(),
        };

        Ok(CoachConfig {
            common,
            gemini: GeminiSettings {
                api_key,
                model: get_env(&lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                api_base: get_env(&lookup, "GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE)
                    .trim_end_matches('/')
                    .to_string(),
                temperature,
            },
            prompt: PromptSettings { task_placement },
        })
    }
}

/// Accepts finite values in `MIN_TEMPERATURE..=MAX_TEMPERATURE`.
fn parse_temperature(raw: &str) -> Result<f32, AppError> {
    let value = raw.trim().parse::<f32>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "GEMINI_TEMPERATURE must be a number, got '{}': {}",
            raw,
            e
        ))
    })?;

    if !value.is_finite() || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&value) {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "GEMINI_TEMPERATURE must be between {} and {}, got '{}'",
            MIN_TEMPERATURE,
            MAX_TEMPERATURE,
            raw
        )));
    }

    Ok(value)
}

fn get_env<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
