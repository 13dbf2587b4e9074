//! Listing lifecycle: deleting a record together with its image blobs.

use crate::context::ClientContext;
use crate::task::{dispatch, TaskHandle};
use autolot_core::models::{ImageReference, ListingRecord};
use autolot_core::AppError;
use autolot_storage::keys::image_key;
use autolot_storage::BlobStore;
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

/// How many blob deletions run concurrently during a lifecycle delete.
const DELETE_CONCURRENCY: usize = 8;

/// One image whose blob deletion failed during a lifecycle delete.
#[derive(Debug, Clone)]
pub struct ImageDeleteFailure {
    pub reference: ImageReference,
    pub error: String,
}

/// Aggregate result of deleting a listing and its blobs.
///
/// A non-empty `failures` list is a consistency risk, not a failed delete:
/// the record is already gone, and the listed blobs are invisible orphans
/// awaiting an external sweep.
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub listing_id: String,
    pub images_attempted: usize,
    pub failures: Vec<ImageDeleteFailure>,
}

impl DeleteReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Deletes listing records and best-effort deletes their blobs.
pub struct ListingLifecycleManager {
    ctx: ClientContext,
}

impl ListingLifecycleManager {
    pub fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Delete `record` and all blobs it references.
    ///
    /// The document goes first: once it is deleted the listing is invisible
    /// to every consumer, so a blob deletion failing afterwards only leaves
    /// an invisible orphan. The reverse order could leave a visible listing
    /// whose images have vanished. Blob deletions are dispatched
    /// independently and in parallel; one failure never blocks or rolls back
    /// the others, and absence (document or blob) is success, so repeating a
    /// delete is a no-op with an empty report.
    pub async fn delete_listing(&self, record: &ListingRecord) -> Result<DeleteReport, AppError> {
        self.delete_listing_inner(record, &CancellationToken::new())
            .await
    }

    /// Delete by id, tolerating an already-absent record.
    pub async fn delete_by_id(&self, id: &str) -> Result<DeleteReport, AppError> {
        match self.ctx.listings.get(id).await? {
            Some(record) => self.delete_listing(&record).await,
            None => {
                // Already gone; no record means no image list to delete from.
                self.ctx.listings.delete(id).await?;
                Ok(DeleteReport {
                    listing_id: id.to_string(),
                    ..Default::default()
                })
            }
        }
    }

    /// Dispatch a lifecycle delete on its own task.
    pub fn dispatch_delete(&self, record: ListingRecord) -> TaskHandle<Result<DeleteReport, AppError>> {
        let manager = Self {
            ctx: self.ctx.clone(),
        };
        dispatch(move |cancel| async move { manager.delete_listing_inner(&record, &cancel).await })
    }

    async fn delete_listing_inner(
        &self,
        record: &ListingRecord,
        cancel: &CancellationToken,
    ) -> Result<DeleteReport, AppError> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        // Document first. If this fails, nothing else is attempted and the
        // listing stays fully intact.
        self.ctx.listings.delete(&record.id).await?;

        if cancel.is_cancelled() {
            // The record is gone; skipping the blobs leaves orphans, which is
            // the accepted failure direction.
            return Ok(DeleteReport {
                listing_id: record.id.clone(),
                ..Default::default()
            });
        }

        let listing_id = record.id.clone();
        let failures: Vec<ImageDeleteFailure> = stream::iter(record.images.clone())
            .map(|image| {
                let blobs = self.ctx.blobs.clone();
                let listing_id = listing_id.clone();
                async move {
                    let key = image_key(&image.owner_id, &image.name);
                    match blobs.delete(&key).await {
                        Ok(()) => None,
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                key = %key,
                                listing_id = %listing_id,
                                "Failed to delete listing image blob"
                            );
                            Some(ImageDeleteFailure {
                                reference: image,
                                error: e.to_string(),
                            })
                        }
                    }
                }
            })
            .buffer_unordered(DELETE_CONCURRENCY)
            .filter_map(|failure| async move { failure })
            .collect()
            .await;

        Ok(DeleteReport {
            listing_id,
            images_attempted: record.images.len(),
            failures,
        })
    }
}
