#![allow(dead_code)]

//! Shared test doubles: counting and failure-injecting stores around the
//! in-memory backends.

use async_trait::async_trait;
use autolot_core::models::{Identity, ListingForm};
use autolot_core::{AppError, StorageBackend};
use autolot_db::{Document, DocumentStore, Filter, ListingRepository, MemoryDocumentStore};
use autolot_services::ClientContext;
use autolot_storage::{BlobStore, MemoryBlobStore, StorageError, StorageResult};
use bytes::Bytes;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn test_identity() -> Identity {
    Identity::new("owner-1")
        .with_display_name("Test Owner")
        .with_email("owner@example.com")
}

pub fn valid_form() -> ListingForm {
    ListingForm {
        name: "gol g4".to_string(),
        model: "1.0".to_string(),
        year: "2016".to_string(),
        km: "30000".to_string(),
        price: "25000".to_string(),
        city: "Piracicaba".to_string(),
        whatsapp: "11999998888".to_string(),
        description: "ok".to_string(),
    }
}

pub fn jpeg_payload() -> (String, Bytes) {
    ("image/jpeg".to_string(), Bytes::from_static(b"jpeg-bytes"))
}

/// A context over fresh in-memory stores, returned alongside the typed store
/// handles so tests can inspect raw state.
pub struct TestEnv {
    pub ctx: ClientContext,
    pub docs: Arc<MemoryDocumentStore>,
    pub blobs: Arc<MemoryBlobStore>,
}

pub fn test_env() -> TestEnv {
    let docs = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let ctx = ClientContext::new(
        test_identity(),
        ListingRepository::new(docs.clone()),
        blobs.clone(),
    );
    TestEnv { ctx, docs, blobs }
}

/// Blob store that counts every call, for asserting zero store contact.
pub struct CountingBlobStore {
    inner: MemoryBlobStore,
    calls: AtomicUsize,
}

impl CountingBlobStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for CountingBlobStore {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, content_type, data).await
    }

    async fn resolve_url(&self, key: &str) -> StorageResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_url(key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

/// Blob store whose deletes fail for an injectable set of keys.
pub struct FlakyDeleteBlobStore {
    inner: MemoryBlobStore,
    fail_keys: Mutex<HashSet<String>>,
}

impl FlakyDeleteBlobStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new(),
            fail_keys: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_on(&self, key: impl Into<String>) {
        self.fail_keys.lock().unwrap().insert(key.into());
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.contains(key).await
    }
}

#[async_trait]
impl BlobStore for FlakyDeleteBlobStore {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        self.inner.put(key, content_type, data).await
    }

    async fn resolve_url(&self, key: &str) -> StorageResult<String> {
        self.inner.resolve_url(key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        if self.fail_keys.lock().unwrap().contains(key) {
            return Err(StorageError::DeleteFailed(format!(
                "injected delete failure: {}",
                key
            )));
        }
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

/// Blob store whose first put is slow, for exercising completion-order
/// appends.
pub struct SlowFirstPutBlobStore {
    inner: MemoryBlobStore,
    puts: AtomicUsize,
}

impl SlowFirstPutBlobStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new(),
            puts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BlobStore for SlowFirstPutBlobStore {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        if self.puts.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        self.inner.put(key, content_type, data).await
    }

    async fn resolve_url(&self, key: &str) -> StorageResult<String> {
        self.inner.resolve_url(key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

/// Document store that counts creates and can fail writes or deletes.
pub struct ScriptedDocumentStore {
    inner: MemoryDocumentStore,
    creates: AtomicUsize,
    fail_creates: bool,
    fail_deletes: bool,
}

impl ScriptedDocumentStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            creates: AtomicUsize::new(0),
            fail_creates: false,
            fail_deletes: false,
        }
    }

    pub fn failing_creates() -> Self {
        Self {
            fail_creates: true,
            ..Self::new()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::new()
        }
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for ScriptedDocumentStore {
    async fn create(&self, collection: &str, record: Value) -> Result<String, AppError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates {
            return Err(AppError::StoreWrite("injected write failure".to_string()));
        }
        self.inner.create(collection, record).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        self.inner.get(collection, id).await
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, AppError> {
        self.inner.query(collection, filter).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        if self.fail_deletes {
            return Err(AppError::StoreDelete("injected delete failure".to_string()));
        }
        self.inner.delete(collection, id).await
    }
}
