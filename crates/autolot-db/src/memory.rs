//! In-memory document store, used by tests and the demo flows.
//!
//! Rows keep insertion order, which is the order queries return them in.

use crate::store::{Document, DocumentStore, Filter};
use async_trait::async_trait;
use autolot_core::AppError;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Document store holding everything in process memory.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    /// Insert a record under a caller-chosen id, bypassing id assignment.
    /// Test seam for reproducing malformed store states.
    pub async fn insert_raw(&self, collection: &str, id: impl Into<String>, data: Value) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.into(),
                data,
            });
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: &str, record: Value) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                data: record,
            });
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|rows| rows.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|rows| {
                rows.iter()
                    .filter(|doc| filter.matches(&doc.data))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let mut collections = self.collections.write().await;
        if let Some(rows) = collections.get_mut(collection) {
            rows.retain(|doc| doc.id != id);
        }
        Ok(())
    }
}
