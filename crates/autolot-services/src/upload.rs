//! Asset upload: one blob per call, plus single-image removal.

use crate::context::ClientContext;
use crate::session::{PreviewHandle, SessionImage, UploadSession};
use crate::task::{dispatch, TaskHandle};
use autolot_core::models::{Identity, ImageReference};
use autolot_core::validation::validate_image_content_type;
use autolot_core::AppError;
use autolot_storage::keys::image_key;
use autolot_storage::BlobStore;
use bytes::Bytes;
use std::sync::Arc;
use uuid::Uuid;

/// One binary payload handed to the uploader.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub content_type: String,
    pub data: Bytes,
}

impl ImagePayload {
    pub fn new(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// A completed upload: the durable reference plus a transient preview.
#[derive(Debug)]
pub struct UploadedImage {
    pub reference: ImageReference,
    pub preview: PreviewHandle,
}

/// Uploads listing images to the blob store.
#[derive(Clone)]
pub struct AssetUploader {
    blobs: Arc<dyn BlobStore>,
}

impl AssetUploader {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    pub fn for_context(ctx: &ClientContext) -> Self {
        Self::new(ctx.blobs.clone())
    }

    /// Upload one image for `identity`.
    ///
    /// The content type is checked against the jpeg/png allow-list before the
    /// blob store is contacted. The blob name is generated, never taken from
    /// a client file name. One blob per call, no retry: on failure the caller
    /// re-invokes, and the preview is released either way.
    pub async fn upload(
        &self,
        identity: &Identity,
        payload: ImagePayload,
    ) -> Result<UploadedImage, AppError> {
        validate_image_content_type(&payload.content_type)?;

        let preview = PreviewHandle::new(payload.data.clone());
        let name = Uuid::new_v4().to_string();
        let key = image_key(&identity.id, &name);

        self.blobs
            .put(&key, &payload.content_type, payload.data)
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        let url = self
            .blobs
            .resolve_url(&key)
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        tracing::debug!(key = %key, "Uploaded listing image");

        Ok(UploadedImage {
            reference: ImageReference {
                owner_id: identity.id.clone(),
                name,
                url,
            },
            preview,
        })
    }

    /// Dispatch an upload on its own task; on completion the image is
    /// appended to `session` atomically, so session order is completion
    /// order, not initiation order.
    pub fn dispatch_upload(
        &self,
        session: &UploadSession,
        identity: &Identity,
        payload: ImagePayload,
    ) -> TaskHandle<Result<ImageReference, AppError>> {
        let uploader = self.clone();
        let session = session.clone();
        let identity = identity.clone();

        dispatch(move |cancel| async move {
            if cancel.is_cancelled() {
                return Err(AppError::Cancelled);
            }

            let uploaded = uploader.upload(&identity, payload).await?;
            let reference = uploaded.reference.clone();
            session.append(SessionImage {
                reference: uploaded.reference,
                preview: uploaded.preview,
            });
            Ok(reference)
        })
    }

    /// Remove one image from an active session, deleting its blob first.
    ///
    /// The session entry is removed only once the store delete succeeds
    /// (absence counts as success); on failure the entry is kept so the
    /// session never claims less than the store holds, and the error is
    /// surfaced.
    pub async fn remove(
        &self,
        session: &UploadSession,
        reference: &ImageReference,
    ) -> Result<(), AppError> {
        let key = image_key(&reference.owner_id, &reference.name);

        self.blobs.delete(&key).await.map_err(|e| {
            tracing::warn!(error = %e, key = %key, "Failed to delete session image blob");
            AppError::StoreDelete(e.to_string())
        })?;

        if let Some(removed) = session.remove(&reference.name) {
            removed.preview.release();
        }
        Ok(())
    }
}
