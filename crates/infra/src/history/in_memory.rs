use std::sync::RwLock;

use async_trait::async_trait;

use greenloop_ai::AnalysisRecord;

use super::AnalysisHistory;
use crate::storage::StorageError;

/// In-memory history for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAnalysisHistory {
    records: RwLock<Vec<AnalysisRecord>>,
}

impl InMemoryAnalysisHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisHistory for InMemoryAnalysisHistory {
    async fn append(&self, record: AnalysisRecord) -> Result<(), StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::Unavailable("history lock poisoned".to_string()))?;
        records.insert(0, record);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AnalysisRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::Unavailable("history lock poisoned".to_string()))?;
        Ok(records.clone())
    }
}
