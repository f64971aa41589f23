use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, info};

use greenloop_ai::{AnalysisRecord, Recommendation, RecommendationGenerator, RecommendationSource};
use greenloop_core::{AnalysisId, AssetRecord, DomainError, DomainResult};
use greenloop_inventory::summarize;

use crate::history::AnalysisHistory;

/// Result of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub recommendations: Vec<Recommendation>,
    /// Id of the analysis record. `None` only for an empty inventory, which is
    /// not recorded; a failed history write still reports the id.
    pub id: Option<AnalysisId>,
    #[serde(skip)]
    pub source: RecommendationSource,
}

/// Runs the analysis pipeline and records each non-empty result.
#[derive(Clone)]
pub struct InventoryAnalyzer {
    generator: RecommendationGenerator,
    history: Arc<dyn AnalysisHistory>,
}

impl InventoryAnalyzer {
    pub fn new(generator: RecommendationGenerator, history: Arc<dyn AnalysisHistory>) -> Self {
        Self { generator, history }
    }

    pub fn generator(&self) -> &RecommendationGenerator {
        &self.generator
    }

    pub fn history(&self) -> &Arc<dyn AnalysisHistory> {
        &self.history
    }

    pub async fn analyze(&self, items: &[AssetRecord]) -> AnalysisOutcome {
        let summary = summarize(items);
        let generated = self.generator.generate(summary.as_ref()).await;

        if generated.source == RecommendationSource::Empty {
            return AnalysisOutcome {
                recommendations: generated.recommendations,
                id: None,
                source: generated.source,
            };
        }

        let record = AnalysisRecord::new(generated.recommendations);
        let id = record.id;
        let recommendations = record.recommendations.clone();

        match self.history.append(record).await {
            Ok(()) => info!(
                analysis_id = %id,
                items = items.len(),
                source = generated.source.as_str(),
                "analysis recorded"
            ),
            Err(e) => error!(analysis_id = %id, error = %e, "failed to record analysis; returning result anyway"),
        }

        AnalysisOutcome {
            recommendations,
            id: Some(id),
            source: generated.source,
        }
    }
}

/// Decode the `items` field of an analysis request.
///
/// Anything other than a JSON array is rejected. Elements are decoded
/// leniently (see [`AssetRecord`]); an element that is not an object is
/// rejected too.
pub fn items_from_json(items: JsonValue) -> DomainResult<Vec<AssetRecord>> {
    if !items.is_array() {
        return Err(DomainError::invalid_input("items must be an array"));
    }
    serde_json::from_value(items).map_err(|e| DomainError::invalid_input(format!("invalid item: {e}")))
}
