//! Asset store: the inventory the analysis engine reads from.

pub mod in_memory;
pub mod json_file;

use async_trait::async_trait;
use serde::Deserialize;

use greenloop_core::{AssetId, AssetRecord, DomainError, DomainResult, CO2_PER_KG};

use crate::storage::StorageError;

pub use in_memory::InMemoryAssetStore;
pub use json_file::JsonFileAssetStore;

/// Fields required to register an asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewAsset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub weight: f64,
}

impl NewAsset {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(DomainError::validation(
                "missing required fields: name, category, weight",
            ));
        }
        validate_weight(self.weight)
    }

    /// Build the stored record; `co2_saved` is estimated from the weight.
    pub fn into_record(self, id: AssetId) -> AssetRecord {
        AssetRecord::new(id, self.name.trim(), self.category.trim(), self.weight)
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub weight: Option<f64>,
}

impl AssetUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::validation("name must not be blank"));
        }
        if self.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(DomainError::validation("category must not be blank"));
        }
        match self.weight {
            Some(w) => validate_weight(w),
            None => Ok(()),
        }
    }

    /// Apply to `record`. A new weight re-estimates `co2_saved`.
    pub fn apply(self, record: &mut AssetRecord) {
        if let Some(name) = self.name {
            record.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            record.category = Some(category.trim().to_string());
        }
        if let Some(weight) = self.weight {
            record.weight = weight;
            record.co2_saved = Some(weight * CO2_PER_KG);
        }
    }
}

fn validate_weight(weight: f64) -> DomainResult<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(DomainError::validation("weight must be a positive number"))
    }
}

/// CRUD boundary for assets.
///
/// Callers validate [`NewAsset`] / [`AssetUpdate`] before handing them over.
#[async_trait]
pub trait AssetStore: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<AssetRecord>, StorageError>;

    async fn get(&self, id: AssetId) -> Result<Option<AssetRecord>, StorageError>;

    /// Assigns a fresh id and stores the record.
    async fn create(&self, asset: NewAsset) -> Result<AssetRecord, StorageError>;

    /// `StorageError::NotFound` if `id` is unknown.
    async fn update(&self, id: AssetId, update: AssetUpdate) -> Result<AssetRecord, StorageError>;

    /// `StorageError::NotFound` if `id` is unknown.
    async fn delete(&self, id: AssetId) -> Result<AssetRecord, StorageError>;
}
