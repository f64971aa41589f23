//! `greenloop-ai`
//!
//! **Responsibility:** turn an inventory summary into prioritized
//! recommendations.
//!
//! This crate is intentionally storage-agnostic:
//! - It never reads or writes the asset or history stores.
//! - The completion provider is injected; no HTTP client lives here.
//! - Provider and parse failures degrade to a deterministic heuristic.

pub mod generator;
pub mod heuristic;
pub mod normalize;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod result;

pub use generator::{Generated, GeneratorSettings, RecommendationGenerator, RecommendationSource};
pub use provider::{CompletionOptions, CompletionProvider};
pub use result::{
    AnalysisRecord, GenerationFailure, ParseError, Priority, ProviderError, Recommendation,
    RECOMMENDATION_COUNT,
};
