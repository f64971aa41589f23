use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::ProviderError;

/// Per-request generation settings passed to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.4,
            max_tokens: 600,
        }
    }
}

/// Text-in, text-out completion collaborator.
///
/// Implementations live outside this crate (HTTP clients in infra, stubs in
/// tests). The returned text is free-form and not guaranteed to be JSON.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;
}
