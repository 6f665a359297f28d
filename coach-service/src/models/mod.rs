//! Request and response bodies of the coach HTTP API.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[validate(
        required(message = "Missing required field: prompt"),
        custom(function = "not_blank", message = "Missing required field: prompt")
    )]
    pub prompt: Option<String>,

    /// Persona tag: `wise`, `energizer`, `strategist` or anything else for
    /// the default coach. Non-string values are accepted and ignored.
    pub coach_type: Option<serde_json::Value>,

    pub tasks: Option<Vec<String>>,
}

impl GenerateRequest {
    pub fn coach_type(&self) -> Option<&str> {
        self.coach_type.as_ref().and_then(|v| v.as_str())
    }

    pub fn tasks(&self) -> &[String] {
        self.tasks.as_deref().unwrap_or_default()
    }
}

/// Successful generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flatten validator output into one caller-facing sentence.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid field: {}", field),
            })
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join("; ")
}
