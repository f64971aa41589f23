//! Shared JSON-file persistence helpers.
//!
//! Files hold a single JSON array. Writes go to a sibling temporary file that
//! is then renamed over the target, so readers never observe a half-written
//! document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

/// Storage error for the asset and history stores.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a JSON array; a missing or blank file is an empty list.
pub(crate) async fn read_json_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    match tokio::fs::read_to_string(path).await {
        Ok(body) if body.trim().is_empty() => Ok(Vec::new()),
        Ok(body) => serde_json::from_str(&body)
            .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// Pretty-print `value` to `path` via write-then-rename.
pub(crate) async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::io(parent, e))?;
    }

    let body = serde_json::to_vec_pretty(value).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, body)
        .await
        .map_err(|e| StorageError::io(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StorageError::io(path, e))
}
