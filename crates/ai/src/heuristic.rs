//! Deterministic recommendations used when the provider is disabled or fails.
//!
//! Model:
//! - `high`: the top-impact devices and the total CO₂ avoided.
//! - `medium`: the category with the highest CO₂ total and its device count.
//! - `low`: a fixed process suggestion, independent of the data.

use greenloop_core::DEFAULT_CATEGORY;
use greenloop_inventory::InventorySummary;

use crate::result::{Priority, Recommendation};

/// The single recommendation returned for an empty inventory.
pub fn empty_inventory() -> Recommendation {
    Recommendation::new(
        Priority::High,
        "Ajoutez vos premiers équipements",
        "Votre inventaire est vide : enregistrez les équipements réemployés pour obtenir des recommandations personnalisées.",
        "➕",
    )
}

/// Three recommendations derived only from the summary. Never fails.
pub fn fallback(summary: &InventorySummary) -> Vec<Recommendation> {
    let names: Vec<&str> = summary
        .top_devices
        .iter()
        .map(|d| d.name.trim())
        .filter(|n| !n.is_empty())
        .collect();
    let devices = if names.is_empty() {
        "vos équipements".to_string()
    } else {
        names.join(", ")
    };

    let (category, count) = summary
        .top_category()
        .map(|c| (c.category.as_str(), c.count))
        .unwrap_or((DEFAULT_CATEGORY, 0));

    vec![
        Recommendation::new(
            Priority::High,
            "Prolongez la vie des équipements à fort impact",
            format!(
                "{devices} concentrent le plus d'émissions évitées. Planifiez leur maintenance et leur redéploiement : {:.1} kg de CO₂ évités au total.",
                summary.total_co2
            ),
            "🌍",
        ),
        Recommendation::new(
            Priority::Medium,
            format!("Développez le réemploi : {category}"),
            format!(
                "La catégorie {category} est la plus contributive avec {count} équipement(s). Étendez la collecte et le reconditionnement de ce type de matériel."
            ),
            "📦",
        ),
        Recommendation::new(
            Priority::Low,
            "Formalisez votre processus de réemploi",
            "Documentez les étapes de collecte, de diagnostic, d'effacement des données et de redistribution pour suivre l'impact dans la durée.",
            "♻️",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenloop_core::{AssetId, AssetRecord};
    use greenloop_inventory::summarize;

    #[test]
    fn fallback_cites_top_device_and_category() {
        let items = vec![
            AssetRecord::new(AssetId::from_raw(1), "Laptop A", "Laptops", 2.0).with_co2_saved(Some(40.0)),
            AssetRecord::new(AssetId::from_raw(2), "Monitor B", "Monitors", 5.0).with_co2_saved(Some(100.0)),
        ];
        let recs = fallback(&summarize(&items).unwrap());

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].description.starts_with("Monitor B, Laptop A"));
        assert!(recs[0].description.contains("140.0 kg"));
        assert_eq!(recs[1].priority, Priority::Medium);
        assert!(recs[1].title.contains("Monitors"));
        assert!(recs[1].description.contains("1 équipement(s)"));
        assert_eq!(recs[2].priority, Priority::Low);
    }

    #[test]
    fn fallback_tolerates_unnamed_devices() {
        let items = vec![AssetRecord {
            id: AssetId::from_raw(1),
            name: String::new(),
            category: None,
            weight: 1.0,
            co2_saved: None,
        }];
        let recs = fallback(&summarize(&items).unwrap());
        assert!(recs[0].description.starts_with("vos équipements"));
        assert!(recs[1].title.contains(DEFAULT_CATEGORY));
    }

    #[test]
    fn empty_inventory_is_high_priority() {
        assert_eq!(empty_inventory().priority, Priority::High);
    }
}
