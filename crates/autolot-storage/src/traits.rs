//! Blob store abstraction trait
//!
//! This module defines the [`BlobStore`] trait that all storage backends must
//! implement, and the storage error type converted into the domain error at
//! the crate seam.

use async_trait::async_trait;
use autolot_core::{AppError, StorageBackend};
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(key),
            StorageError::UploadFailed(msg) => AppError::UploadFailed(msg),
            StorageError::DeleteFailed(msg) => AppError::StoreDelete(msg),
            StorageError::InvalidKey(key) => AppError::InvalidInput(format!("bad blob key: {}", key)),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Blob storage operations used by the upload and lifecycle flows.
///
/// Backends are addressed by owner-scoped keys (see the crate root
/// documentation) and must treat deletion of an absent key as success.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store one blob under `key`.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()>;

    /// Resolve the durable retrieval URL for an existing blob.
    async fn resolve_url(&self, key: &str) -> StorageResult<String>;

    /// Delete the blob at `key`. Absent keys are Ok.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Whether a blob exists at `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Backend identifier for logging.
    fn backend_type(&self) -> StorageBackend;
}
