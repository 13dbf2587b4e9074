use crate::keys::validate_key;
use crate::traits::{BlobStore, StorageError, StorageResult};
use async_trait::async_trait;
use autolot_core::StorageBackend;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem blob store.
#[derive(Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blob storage (e.g., "/var/lib/autolot/blobs")
    /// * `base_url` - Base URL under which blobs are served (e.g., "http://localhost:3000/blobs")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore {
            base_path,
            base_url,
        })
    }

    /// Convert a blob key to a filesystem path, rejecting keys that would
    /// escape the base directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(key))
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, _content_type: &str, data: Bytes) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("{}: {}", path.display(), e)))?;
        file.write_all(&data)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        tracing::debug!(key = %key, size_bytes = data.len(), "Stored blob on local filesystem");
        Ok(())
    }

    async fn resolve_url(&self, key: &str) -> StorageResult<String> {
        let path = self.key_to_path(key)?;
        if !fs::try_exists(&path).await? {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(self.url_for(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key = %key, "Deleted blob from local filesystem");
                Ok(())
            }
            // An absent blob is a deleted blob.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!("{}: {}", key, e))),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (tempfile::TempDir, LocalBlobStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalBlobStore::new(
            dir.path().to_path_buf(),
            "http://localhost:3000/blobs".to_string(),
        )
        .await
        .expect("create store");
        (dir, store)
    }

    #[tokio::test]
    async fn put_resolve_delete_roundtrip() {
        let (_dir, store) = store().await;
        let key = "images/owner-1/abc";

        store
            .put(key, "image/jpeg", Bytes::from_static(b"jpeg-bytes"))
            .await
            .unwrap();
        assert!(store.exists(key).await.unwrap());
        assert_eq!(
            store.resolve_url(key).await.unwrap(),
            "http://localhost:3000/blobs/images/owner-1/abc"
        );

        store.delete(key).await.unwrap();
        assert!(!store.exists(key).await.unwrap());
    }

    #[tokio::test]
    async fn delete_of_absent_key_is_ok() {
        let (_dir, store) = store().await;
        assert!(store.delete("images/owner-1/never-there").await.is_ok());
    }

    #[tokio::test]
    async fn resolve_url_of_absent_key_is_not_found() {
        let (_dir, store) = store().await;
        assert!(matches!(
            store.resolve_url("images/owner-1/missing").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rejects_traversal_key() {
        let (_dir, store) = store().await;
        assert!(matches!(
            store
                .put("../outside", "image/png", Bytes::from_static(b"x"))
                .await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
