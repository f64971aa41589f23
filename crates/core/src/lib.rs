//! `greenloop-core`: shared building blocks for the asset tracker.
//!
//! This crate contains **pure** primitives (no infrastructure concerns): the
//! asset record read by every other crate, identifiers and the error model.

pub mod asset;
pub mod error;
pub mod id;

pub use asset::{AssetRecord, CO2_PER_KG, DEFAULT_CATEGORY};
pub use error::{DomainError, DomainResult};
pub use id::{AnalysisId, AssetId};
