//! In-memory blob store, used by tests and the demo flows.

use crate::keys::validate_key;
use crate::traits::{BlobStore, StorageError, StorageResult};
use async_trait::async_trait;
use autolot_core::StorageBackend;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Blob store holding everything in process memory.
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Bytes>>,
    base_url: String,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::with_base_url("memory://blobs".to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
            base_url,
        }
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.blobs.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, _content_type: &str, data: Bytes) -> StorageResult<()> {
        validate_key(key)?;
        self.blobs.write().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn resolve_url(&self, key: &str) -> StorageResult<String> {
        if !self.blobs.read().await.contains_key(key) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(self.url_for(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.blobs.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.blobs.read().await.contains_key(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_and_resolve() {
        let store = MemoryBlobStore::new();
        store
            .put("images/o/a", "image/png", Bytes::from_static(b"png"))
            .await
            .unwrap();
        assert_eq!(
            store.resolve_url("images/o/a").await.unwrap(),
            "memory://blobs/images/o/a"
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryBlobStore::new();
        store
            .put("images/o/a", "image/png", Bytes::from_static(b"png"))
            .await
            .unwrap();
        store.delete("images/o/a").await.unwrap();
        store.delete("images/o/a").await.unwrap();
        assert!(store.is_empty().await);
    }
}
