#[cfg(feature = "docstore-local")]
use crate::LocalDocumentStore;
#[cfg(feature = "docstore-rest")]
use crate::RestDocumentStore;
use crate::{DocumentStore, MemoryDocumentStore};
use autolot_core::{AppError, Config, DocStoreBackend};
use std::sync::Arc;

/// Create a document store backend based on configuration
pub async fn create_document_store(config: &Config) -> Result<Arc<dyn DocumentStore>, AppError> {
    let backend = config.docstore_backend().unwrap_or(DocStoreBackend::Local);

    match backend {
        #[cfg(feature = "docstore-rest")]
        DocStoreBackend::Rest => {
            let base_url = config.docstore_url().map(String::from).ok_or_else(|| {
                AppError::InvalidInput("AUTOLOT_DOCSTORE_URL not configured".to_string())
            })?;
            let token = config.docstore_token().map(String::from);

            let store = RestDocumentStore::new(base_url, token)?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "docstore-rest"))]
        DocStoreBackend::Rest => Err(AppError::InvalidInput(
            "REST document store not available (docstore-rest feature not enabled)".to_string(),
        )),

        #[cfg(feature = "docstore-local")]
        DocStoreBackend::Local => {
            let base_path = config.docstore_path().map(String::from).ok_or_else(|| {
                AppError::InvalidInput("AUTOLOT_DOCSTORE_PATH not configured".to_string())
            })?;

            let store = LocalDocumentStore::new(base_path).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "docstore-local"))]
        DocStoreBackend::Local => Err(AppError::InvalidInput(
            "Local document store not available (docstore-local feature not enabled)".to_string(),
        )),

        DocStoreBackend::Memory => Ok(Arc::new(MemoryDocumentStore::new())),
    }
}
