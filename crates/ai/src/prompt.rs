//! Prompt rendering for the completion provider.

use std::fmt::Write as _;

use greenloop_inventory::InventorySummary;

/// Instructions sent as the system prompt.
pub const SYSTEM_PROMPT: &str = "Tu es un expert en numérique responsable et en réemploi \
d'équipements informatiques. Réponds UNIQUEMENT avec un tableau JSON de exactement 3 objets, \
sans texte autour ni bloc de code. Chaque objet a les clés \"priority\" (\"high\", \"medium\" \
ou \"low\"), \"title\" (80 caractères maximum), \"description\" (250 caractères maximum) et \
\"icon\" (un seul emoji).";

/// Render the inventory summary into the user prompt.
pub fn render_user_prompt(summary: &InventorySummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Inventaire des équipements réemployés :");
    let _ = writeln!(out);
    let _ = writeln!(out, "Répartition par catégorie :");
    for c in &summary.categories {
        let _ = writeln!(
            out,
            "- {} : {} équipement(s), {:.1} kg, {:.1} kg CO₂ évités",
            c.category, c.count, c.weight, c.co2
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Équipements à plus fort impact :");
    for (rank, d) in summary.top_devices.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({}) : {:.1} kg CO₂ évités",
            rank + 1,
            d.name,
            d.category_label(),
            d.effective_co2()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Total CO₂ évité : {:.1} kg", summary.total_co2);
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Propose 3 recommandations concrètes et priorisées pour augmenter l'impact environnemental de cet inventaire."
    );

    out
}
