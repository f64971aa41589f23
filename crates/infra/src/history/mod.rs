//! Analysis history: append-only, newest-first.

pub mod in_memory;
pub mod json_file;

use async_trait::async_trait;

use greenloop_ai::AnalysisRecord;

use crate::storage::StorageError;

pub use in_memory::InMemoryAnalysisHistory;
pub use json_file::JsonFileAnalysisHistory;

/// Persistence boundary for analysis records.
#[async_trait]
pub trait AnalysisHistory: Send + Sync + 'static {
    /// Prepend `record` (newest-first ordering).
    async fn append(&self, record: AnalysisRecord) -> Result<(), StorageError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<AnalysisRecord>, StorageError>;
}
