use serde::{Deserialize, Serialize};

use crate::id::AssetId;

/// Label used for assets without a (non-blank) category.
pub const DEFAULT_CATEGORY: &str = "Autre";

/// Estimated kilograms of CO₂ avoided per kilogram of reused equipment.
///
/// Used when a record carries no explicit `co2_saved` value.
pub const CO2_PER_KG: f64 = 20.0;

/// A tracked piece of reused IT equipment.
///
/// Owned by the asset store. Analysis code only reads it. Fields other than
/// `weight` are lenient on input because analysis requests carry records
/// straight from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(default)]
    pub id: AssetId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_saved: Option<f64>,
}

impl AssetRecord {
    pub fn new(id: AssetId, name: impl Into<String>, category: impl Into<String>, weight: f64) -> Self {
        Self {
            id,
            name: name.into(),
            category: Some(category.into()),
            weight,
            co2_saved: Some(weight * CO2_PER_KG),
        }
    }

    pub fn with_co2_saved(mut self, co2_saved: Option<f64>) -> Self {
        self.co2_saved = co2_saved;
        self
    }

    /// Category label used for grouping (`"Autre"` when missing or blank).
    pub fn category_label(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// `co2_saved`, or `weight × 20` when the record has none.
    pub fn effective_co2(&self) -> f64 {
        self.co2_saved.unwrap_or(self.weight * CO2_PER_KG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_category_maps_to_default_label() {
        let mut a = AssetRecord::new(AssetId::from_raw(1), "Laptop", "  ", 2.0);
        assert_eq!(a.category_label(), DEFAULT_CATEGORY);
        a.category = None;
        assert_eq!(a.category_label(), DEFAULT_CATEGORY);
        a.category = Some("Laptops".into());
        assert_eq!(a.category_label(), "Laptops");
    }

    #[test]
    fn effective_co2_substitutes_weight_estimate() {
        let a = AssetRecord::new(AssetId::from_raw(1), "Laptop", "Laptops", 2.5).with_co2_saved(None);
        assert_eq!(a.effective_co2(), 50.0);
        let b = a.with_co2_saved(Some(7.0));
        assert_eq!(b.effective_co2(), 7.0);
    }

    #[test]
    fn deserializes_sparse_client_payloads() {
        let a: AssetRecord = serde_json::from_str(r#"{"name":"Hub","weight":1}"#).unwrap();
        assert_eq!(a.category, None);
        assert_eq!(a.co2_saved, None);
        assert_eq!(a.effective_co2(), 20.0);
    }
}
