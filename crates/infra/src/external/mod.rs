//! External service clients/adapters.

pub mod openai;

pub use openai::OpenAiCompatibleProvider;

use std::sync::Arc;

use greenloop_ai::{CompletionProvider, ProviderError};

use crate::config::AiConfig;

/// Build the configured completion provider.
pub fn provider_from_config(config: &AiConfig) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    let provider = OpenAiCompatibleProvider::new(&config.base_url, config.api_key.clone(), config.timeout)?;
    Ok(Arc::new(provider))
}
