use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use greenloop_core::AssetRecord;

/// Number of devices kept in [`InventorySummary::top_devices`].
pub const TOP_DEVICES: usize = 3;

/// Aggregated figures for one category of the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: String,
    pub count: u64,
    pub weight: f64,
    pub co2: f64,
}

/// Aggregate view of an inventory batch.
///
/// Created fresh per analysis and discarded after use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// One entry per category, descending by CO₂ (ties keep encounter order).
    pub categories: Vec<CategoryStat>,
    /// Up to [`TOP_DEVICES`] records, descending by effective CO₂.
    pub top_devices: Vec<AssetRecord>,
    pub total_co2: f64,
}

impl InventorySummary {
    /// Category with the highest CO₂ total.
    pub fn top_category(&self) -> Option<&CategoryStat> {
        self.categories.first()
    }

    pub fn device_count(&self) -> u64 {
        self.categories.iter().map(|c| c.count).sum()
    }
}

/// Summarize a batch of assets.
///
/// Returns `None` for an empty batch; callers treat that as the "empty
/// inventory" signal rather than summarizing nothing.
///
/// Model:
/// - Group by category label (`"Autre"` for missing/blank categories).
/// - Each item contributes its effective CO₂ (`co2_saved`, or `weight × 20`).
/// - Sorts are stable, so equal totals keep encounter order.
pub fn summarize(items: &[AssetRecord]) -> Option<InventorySummary> {
    if items.is_empty() {
        return None;
    }

    let mut categories: Vec<CategoryStat> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total_co2 = 0.0;

    for item in items {
        let label = item.category_label();
        let co2 = item.effective_co2();
        total_co2 += co2;

        let slot = *index.entry(label).or_insert_with(|| {
            categories.push(CategoryStat {
                category: label.to_string(),
                count: 0,
                weight: 0.0,
                co2: 0.0,
            });
            categories.len() - 1
        });

        let stat = &mut categories[slot];
        stat.count += 1;
        stat.weight += item.weight;
        stat.co2 += co2;
    }

    categories.sort_by(|a, b| descending(a.co2, b.co2));

    let mut ranked: Vec<&AssetRecord> = items.iter().collect();
    ranked.sort_by(|a, b| descending(a.effective_co2(), b.effective_co2()));
    let top_devices = ranked.into_iter().take(TOP_DEVICES).cloned().collect();

    Some(InventorySummary {
        categories,
        top_devices,
        total_co2,
    })
}

// NaN compares equal so it never reorders its neighbours.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
