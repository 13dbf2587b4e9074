//! HTTP client for a remote document store.
//!
//! Speaks a minimal JSON document API with optional bearer auth:
//!
//! - `POST /{collection}` with the record body returns `{"id": "..."}`
//! - `GET /{collection}/{id}` returns `{"id": ..., "data": ...}` or 404
//! - `GET /{collection}?{field}={value}` returns an array of those objects
//! - `DELETE /{collection}/{id}` returns 2xx, or 404 for an absent id
//!
//! 404 maps to `None`/success per the store contract; no wire-level retry.

use crate::store::{Document, DocumentStore, Filter};
use async_trait::async_trait;
use autolot_core::AppError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Remote document store reached over HTTP.
#[derive(Clone, Debug)]
pub struct RestDocumentStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DocumentBody {
    id: String,
    data: Value,
}

impl RestDocumentStore {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn create(&self, collection: &str, record: Value) -> Result<String, AppError> {
        let url = self.collection_url(collection);
        let response = self
            .apply_auth(self.client.post(&url).json(&record))
            .send()
            .await
            .map_err(|e| AppError::StoreWrite(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::StoreWrite(format!(
                "POST {} returned {}",
                url, status
            )));
        }

        let body: CreatedBody = response
            .json()
            .await
            .map_err(|e| AppError::StoreWrite(format!("Malformed create response: {}", e)))?;
        Ok(body.id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let url = self.record_url(collection, id);
        let response = self
            .apply_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let body: DocumentBody = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Malformed document response: {}", e)))?;
        Ok(Some(Document {
            id: body.id,
            data: body.data,
        }))
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, AppError> {
        let url = self.collection_url(collection);
        let value = match &filter.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let response = self
            .apply_auth(self.client.get(&url).query(&[(filter.field.as_str(), value)]))
            .send()
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let body: Vec<DocumentBody> = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Malformed query response: {}", e)))?;
        Ok(body
            .into_iter()
            .map(|doc| Document {
                id: doc.id,
                data: doc.data,
            })
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let url = self.record_url(collection, id);
        let response = self
            .apply_auth(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| AppError::StoreDelete(e.to_string()))?;

        let status = response.status();
        // An absent record is a deleted record.
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(AppError::StoreDelete(format!(
            "DELETE {} returned {}",
            url, status
        )))
    }
}
