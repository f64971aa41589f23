use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use greenloop_ai::AnalysisRecord;

use super::AnalysisHistory;
use crate::storage::{read_json_list, write_json_atomic, StorageError};

/// History persisted as a JSON array in a single file.
///
/// Appends are read-modify-write cycles serialized by an internal mutex, so
/// concurrent analyses sharing this store never drop each other's records.
/// Only one store instance should own a given file.
#[derive(Debug)]
pub struct JsonFileAnalysisHistory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileAnalysisHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AnalysisHistory for JsonFileAnalysisHistory {
    async fn append(&self, record: AnalysisRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut records: Vec<AnalysisRecord> = read_json_list(&self.path).await?;
        records.insert(0, record);
        write_json_atomic(&self.path, &records).await
    }

    async fn list(&self) -> Result<Vec<AnalysisRecord>, StorageError> {
        read_json_list(&self.path).await
    }
}
