use serde_json::Value as JsonValue;

use crate::result::{Priority, Recommendation, RECOMMENDATION_COUNT};

pub const DEFAULT_TITLE: &str = "Recommandation";
pub const DEFAULT_DESCRIPTION: &str = "Aucun détail fourni pour cette recommandation.";
pub const DEFAULT_ICON: &str = "💡";

/// Coerce parsed objects into at most three well-formed recommendations.
///
/// Fewer than three inputs produce fewer outputs; nothing is padded.
pub fn normalize(items: &[JsonValue]) -> Vec<Recommendation> {
    items
        .iter()
        .take(RECOMMENDATION_COUNT)
        .map(normalize_one)
        .collect()
}

fn normalize_one(item: &JsonValue) -> Recommendation {
    let priority = item
        .get("priority")
        .and_then(JsonValue::as_str)
        .and_then(Priority::parse)
        .unwrap_or_default();

    Recommendation::new(
        priority,
        text_field(item, "title", DEFAULT_TITLE),
        text_field(item, "description", DEFAULT_DESCRIPTION),
        text_field(item, "icon", DEFAULT_ICON),
    )
}

fn text_field(item: &JsonValue, key: &str, default: &str) -> String {
    match item.get(key) {
        Some(JsonValue::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}
