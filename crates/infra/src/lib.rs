//! Infrastructure layer: file-backed stores, config, external services.

pub mod ai;
pub mod assets;
pub mod config;
pub mod external;
pub mod history;
pub mod storage;
