//! Mock provider implementation for testing.

use super::{
    FinishReason, GenerationRequest, ProviderError, ProviderResponse, TextProvider,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Mock text provider that records every request it receives.
pub struct MockTextProvider {
    reply: Result<String, ProviderError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockTextProvider {
    /// Answer every request with `text`. Blank text behaves like an upstream
    /// that produced nothing.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Ok(text.into()))
    }

    /// Fail every request with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, ProviderError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request.clone());

        let text = self.reply.clone()?;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResult);
        }

        Ok(ProviderResponse {
            text,
            input_tokens: request.prompt.len() as i32 / 4,
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    fn model(&self) -> &str {
        "mock"
    }
}
