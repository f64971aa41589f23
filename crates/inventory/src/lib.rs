//! Inventory summarization.
//!
//! This crate reduces a batch of asset records into the aggregate figures the
//! recommendation engine works from, implemented purely as deterministic logic
//! (no IO, no HTTP, no storage).

pub mod summary;

pub use summary::{summarize, CategoryStat, InventorySummary, TOP_DEVICES};
