use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use greenloop_core::{AssetId, AssetRecord};

use super::{AssetStore, AssetUpdate, NewAsset};
use crate::storage::{read_json_list, write_json_atomic, StorageError};

/// Assets persisted as a JSON array (`data/items.json` by default).
///
/// Mutations hold an internal mutex for the whole read-modify-write cycle.
#[derive(Debug)]
pub struct JsonFileAssetStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileAssetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<AssetRecord>, StorageError> {
        read_json_list(&self.path).await
    }
}

#[async_trait]
impl AssetStore for JsonFileAssetStore {
    async fn list(&self) -> Result<Vec<AssetRecord>, StorageError> {
        self.load().await
    }

    async fn get(&self, id: AssetId) -> Result<Option<AssetRecord>, StorageError> {
        Ok(self.load().await?.into_iter().find(|a| a.id == id))
    }

    async fn create(&self, asset: NewAsset) -> Result<AssetRecord, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut assets = self.load().await?;
        let record = asset.into_record(AssetId::next());
        assets.push(record.clone());
        write_json_atomic(&self.path, &assets).await?;

        tracing::debug!(asset_id = %record.id, path = %self.path.display(), "asset created");
        Ok(record)
    }

    async fn update(&self, id: AssetId, update: AssetUpdate) -> Result<AssetRecord, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut assets = self.load().await?;
        let record = assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        update.apply(record);
        let updated = record.clone();
        write_json_atomic(&self.path, &assets).await?;
        Ok(updated)
    }

    async fn delete(&self, id: AssetId) -> Result<AssetRecord, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut assets = self.load().await?;
        let idx = assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        let removed = assets.remove(idx);
        write_json_atomic(&self.path, &assets).await?;
        Ok(removed)
    }
}
