#[cfg(feature = "store-local")]
use crate::LocalBlobStore;
#[cfg(feature = "store-s3")]
use crate::S3BlobStore;
use crate::{BlobStore, MemoryBlobStore, StorageError, StorageResult};
use autolot_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create a blob store backend based on configuration
pub async fn create_blob_store(config: &Config) -> StorageResult<Arc<dyn BlobStore>> {
    let backend = config.storage_backend().unwrap_or(StorageBackend::Local);

    match backend {
        #[cfg(feature = "store-s3")]
        StorageBackend::S3 => {
            let bucket = config.s3_bucket().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("AUTOLOT_S3_BUCKET not configured".to_string())
            })?;
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("AUTOLOT_S3_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let store = S3BlobStore::new(bucket, region, endpoint).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 blob store not available (store-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "store-local")]
        StorageBackend::Local => {
            let base_path = config.storage_path().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("AUTOLOT_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.storage_base_url().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("AUTOLOT_STORAGE_BASE_URL not configured".to_string())
            })?;

            let store = LocalBlobStore::new(base_path, base_url).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local blob store not available (store-local feature not enabled)".to_string(),
        )),

        StorageBackend::Memory => Ok(Arc::new(MemoryBlobStore::new())),
    }
}
