use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use greenloop_inventory::InventorySummary;

use crate::heuristic;
use crate::normalize::normalize;
use crate::parse::parse_recommendations;
use crate::prompt::{render_user_prompt, SYSTEM_PROMPT};
use crate::provider::{CompletionOptions, CompletionProvider};
use crate::result::{GenerationFailure, ProviderError, Recommendation};

/// Generation settings shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    pub options: CompletionOptions,
    /// Upper bound on a single provider call; expiry counts as a provider failure.
    pub timeout: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            options: CompletionOptions::default(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// Which path produced a set of recommendations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecommendationSource {
    /// Empty inventory sentinel; the provider was not called.
    Empty,
    Ai,
    Heuristic,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Ai => "ai",
            Self::Heuristic => "heuristic",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
}

/// Produces recommendations from an inventory summary.
///
/// The provider is optional: without one every request takes the heuristic
/// path. Provider and parse failures never escape `generate`.
#[derive(Clone)]
pub struct RecommendationGenerator {
    provider: Option<Arc<dyn CompletionProvider>>,
    settings: GeneratorSettings,
}

impl RecommendationGenerator {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, settings: GeneratorSettings) -> Self {
        Self { provider, settings }
    }

    /// Generator that never calls a provider.
    pub fn heuristic_only() -> Self {
        Self::new(None, GeneratorSettings::default())
    }

    pub fn with_provider(provider: Arc<dyn CompletionProvider>, settings: GeneratorSettings) -> Self {
        Self::new(Some(provider), settings)
    }

    pub fn ai_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// `None` is the empty-inventory signal from the summarizer.
    pub async fn generate(&self, summary: Option<&InventorySummary>) -> Generated {
        let Some(summary) = summary else {
            return Generated {
                recommendations: vec![heuristic::empty_inventory()],
                source: RecommendationSource::Empty,
            };
        };

        let Some(provider) = &self.provider else {
            debug!("no completion provider configured; using heuristic recommendations");
            return heuristic_result(summary);
        };

        match self.try_provider(provider.as_ref(), summary).await {
            Ok(recommendations) => {
                info!(
                    provider = provider.name(),
                    count = recommendations.len(),
                    "recommendations generated by provider"
                );
                Generated {
                    recommendations,
                    source: RecommendationSource::Ai,
                }
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "provider path failed; falling back to heuristic");
                heuristic_result(summary)
            }
        }
    }

    async fn try_provider(
        &self,
        provider: &dyn CompletionProvider,
        summary: &InventorySummary,
    ) -> Result<Vec<Recommendation>, GenerationFailure> {
        let user_prompt = render_user_prompt(summary);
        let timeout = self.settings.timeout;

        let raw = tokio::time::timeout(
            timeout,
            provider.complete(SYSTEM_PROMPT, &user_prompt, &self.settings.options),
        )
        .await
        .map_err(|_| ProviderError::Timeout(timeout))??;

        let items = parse_recommendations(&raw)?;
        Ok(normalize(&items))
    }
}

fn heuristic_result(summary: &InventorySummary) -> Generated {
    Generated {
        recommendations: heuristic::fallback(summary),
        source: RecommendationSource::Heuristic,
    }
}
