//! JSON-file document store: one file per record under
//! `{base}/{collection}/{id}.json`.
//!
//! Queries scan the collection directory and return records in id order,
//! which keeps results deterministic across runs.

use crate::store::{Document, DocumentStore, Filter};
use async_trait::async_trait;
use autolot_core::AppError;
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

/// Document store persisting records as JSON files on the local filesystem.
#[derive(Clone)]
pub struct LocalDocumentStore {
    base_path: PathBuf,
}

impl LocalDocumentStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create document store directory {}: {}",
                base_path.display(),
                e
            ))
        })?;
        Ok(LocalDocumentStore { base_path })
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, AppError> {
        validate_segment(collection)?;
        Ok(self.base_path.join(collection))
    }

    fn record_path(&self, collection: &str, id: &str) -> Result<PathBuf, AppError> {
        validate_segment(id)?;
        Ok(self.collection_dir(collection)?.join(format!("{}.json", id)))
    }
}

/// Collection names and ids become path segments; refuse anything that could
/// escape the base directory.
fn validate_segment(segment: &str) -> Result<(), AppError> {
    if segment.is_empty()
        || segment.contains('/')
        || segment.contains('\\')
        || segment.contains("..")
    {
        return Err(AppError::InvalidInput(format!(
            "invalid path segment: {}",
            segment
        )));
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn create(&self, collection: &str, record: Value) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let dir = self.collection_dir(collection)?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::StoreWrite(e.to_string()))?;

        let payload = serde_json::to_vec_pretty(&record)
            .map_err(|e| AppError::StoreWrite(e.to_string()))?;
        let path = self.record_path(collection, &id)?;
        fs::write(&path, payload)
            .await
            .map_err(|e| AppError::StoreWrite(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(collection = %collection, id = %id, "Created document");
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let path = self.record_path(collection, id)?;
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Internal(format!("{}: {}", path.display(), e))),
        };
        let data: Value = serde_json::from_slice(&raw)
            .map_err(|e| AppError::Internal(format!("Malformed document {}: {}", id, e)))?;
        Ok(Some(Document {
            id: id.to_string(),
            data,
        }))
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, AppError> {
        let dir = self.collection_dir(collection)?;
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Internal(format!("{}: {}", dir.display(), e))),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
        {
            let name = entry.file_name();
            if let Some(id) = name.to_string_lossy().strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        ids.sort();

        let mut docs = Vec::new();
        for id in ids {
            if let Some(doc) = self.get(collection, &id).await? {
                if filter.matches(&doc.data) {
                    docs.push(doc);
                }
            }
        }
        Ok(docs)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let path = self.record_path(collection, id)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(collection = %collection, id = %id, "Deleted document");
                Ok(())
            }
            // An absent record is a deleted record.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StoreDelete(format!("{}: {}", path.display(), e))),
        }
    }
}
