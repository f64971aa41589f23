//! Analysis orchestration: summary, generation, history.
//!
//! Failures of the provider or of the history store never reach callers;
//! an analysis request always yields recommendations.

pub mod analysis_runner;

pub use analysis_runner::{items_from_json, AnalysisOutcome, InventoryAnalyzer};
