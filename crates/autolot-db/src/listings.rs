//! Typed repository for listing records.

use crate::store::{Document, DocumentStore, Filter};
use autolot_core::models::{ListingRecord, NewListing};
use autolot_core::AppError;
use serde_json::Value;
use std::sync::Arc;

/// Collection holding listing records.
pub const LISTINGS_COLLECTION: &str = "listings";

/// Repository over the document store for listing records.
///
/// The persisted payload is the record without its id: ids live beside the
/// payload and are store-assigned. `get` and `list_by_owner` re-attach the id
/// before deserializing, so records round-trip losslessly.
#[derive(Clone)]
pub struct ListingRepository {
    store: Arc<dyn DocumentStore>,
}

impl ListingRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a new listing; the store assigns the id.
    pub async fn create(&self, listing: NewListing) -> Result<ListingRecord, AppError> {
        let payload = serde_json::to_value(&listing)
            .map_err(|e| AppError::StoreWrite(format!("Failed to serialize listing: {}", e)))?;
        let id = self.store.create(LISTINGS_COLLECTION, payload).await?;
        Ok(listing.into_record(id))
    }

    /// Fetch one listing by id.
    pub async fn get(&self, id: &str) -> Result<Option<ListingRecord>, AppError> {
        match self.store.get(LISTINGS_COLLECTION, id).await? {
            Some(doc) => Ok(Some(record_from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// All listings owned by `owner_id`, in store order.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ListingRecord>, AppError> {
        let docs = self
            .store
            .query(LISTINGS_COLLECTION, &Filter::field_eq("owner_id", owner_id))
            .await?;
        docs.into_iter().map(record_from_document).collect()
    }

    /// Delete one listing record. Absent ids are Ok.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(LISTINGS_COLLECTION, id).await
    }
}

fn record_from_document(doc: Document) -> Result<ListingRecord, AppError> {
    let mut data = doc.data;
    match data.as_object_mut() {
        Some(map) => {
            map.insert("id".to_string(), Value::String(doc.id));
        }
        None => {
            return Err(AppError::Internal(format!(
                "Listing {} is not a JSON object",
                doc.id
            )))
        }
    }
    serde_json::from_value(data)
        .map_err(|e| AppError::Internal(format!("Malformed listing record: {}", e)))
}
