use std::sync::RwLock;

use async_trait::async_trait;

use greenloop_core::{AssetId, AssetRecord};

use super::{AssetStore, AssetUpdate, NewAsset};
use crate::storage::StorageError;

/// In-memory asset store for tests/dev. Keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    inner: RwLock<Vec<AssetRecord>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(assets: Vec<AssetRecord>) -> Self {
        Self {
            inner: RwLock::new(assets),
        }
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("asset lock poisoned".to_string())
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn list(&self) -> Result<Vec<AssetRecord>, StorageError> {
        Ok(self.inner.read().map_err(|_| poisoned())?.clone())
    }

    async fn get(&self, id: AssetId) -> Result<Option<AssetRecord>, StorageError> {
        let assets = self.inner.read().map_err(|_| poisoned())?;
        Ok(assets.iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, asset: NewAsset) -> Result<AssetRecord, StorageError> {
        let record = asset.into_record(AssetId::next());
        self.inner.write().map_err(|_| poisoned())?.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: AssetId, update: AssetUpdate) -> Result<AssetRecord, StorageError> {
        let mut assets = self.inner.write().map_err(|_| poisoned())?;
        let record = assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        update.apply(record);
        Ok(record.clone())
    }

    async fn delete(&self, id: AssetId) -> Result<AssetRecord, StorageError> {
        let mut assets = self.inner.write().map_err(|_| poisoned())?;
        let idx = assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        Ok(assets.remove(idx))
    }
}
