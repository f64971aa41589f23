use std::sync::Arc;

use greenloop_ai::{ProviderError, RecommendationGenerator};
use greenloop_infra::{
    ai::InventoryAnalyzer,
    assets::{AssetStore, InMemoryAssetStore, JsonFileAssetStore},
    config::AppConfig,
    external::provider_from_config,
    history::{AnalysisHistory, InMemoryAnalysisHistory, JsonFileAnalysisHistory},
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppServices {
    pub assets: Arc<dyn AssetStore>,
    pub analyzer: InventoryAnalyzer,
}

impl AppServices {
    pub fn new(assets: Arc<dyn AssetStore>, analyzer: InventoryAnalyzer) -> Self {
        Self { assets, analyzer }
    }

    /// Memory-only services; the generator decides whether a provider is used.
    pub fn in_memory(generator: RecommendationGenerator) -> Self {
        let history: Arc<dyn AnalysisHistory> = Arc::new(InMemoryAnalysisHistory::new());
        Self::new(
            Arc::new(InMemoryAssetStore::new()),
            InventoryAnalyzer::new(generator, history),
        )
    }

    pub fn history(&self) -> &Arc<dyn AnalysisHistory> {
        self.analyzer.history()
    }
}

/// File-backed stores under `config.data_dir`, plus the provider when an API
/// key is configured.
pub fn build_services(config: &AppConfig) -> Result<AppServices, ProviderError> {
    let generator = match &config.ai {
        Some(ai) => RecommendationGenerator::with_provider(provider_from_config(ai)?, ai.generator_settings()),
        None => {
            tracing::warn!("no AI API key configured; recommendations will use the heuristic only");
            RecommendationGenerator::heuristic_only()
        }
    };

    let history: Arc<dyn AnalysisHistory> = Arc::new(JsonFileAnalysisHistory::new(config.history_path()));
    let assets: Arc<dyn AssetStore> = Arc::new(JsonFileAssetStore::new(config.assets_path()));

    Ok(AppServices::new(assets, InventoryAnalyzer::new(generator, history)))
}
