//! Client-local upload session for one in-progress create flow.

use autolot_core::models::ImageReference;
use bytes::Bytes;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Transient local preview of an uploaded image, for immediate display.
///
/// Holds the payload bytes so the UI can render the image without a round
/// trip. Released explicitly via [`PreviewHandle::release`] or implicitly on
/// drop — either way, release happens regardless of how the upload turned
/// out.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    data: Bytes,
}

impl PreviewHandle {
    pub(crate) fn new(data: Bytes) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The payload bytes for immediate display.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Release the preview. Dropping the handle has the same effect; this
    /// exists so call sites can be explicit about when display resources go
    /// away.
    pub fn release(self) {}
}

/// One successfully uploaded image held by the session.
#[derive(Debug)]
pub struct SessionImage {
    pub reference: ImageReference,
    pub preview: PreviewHandle,
}

/// Append-only ordered sequence of uploaded images for one create-listing
/// interaction.
///
/// Entries are appended as uploads complete, so order is completion order,
/// not initiation order; the internal lock makes each append atomic with
/// respect to concurrent in-flight uploads. The session shrinks only by
/// explicit removal (which deletes the blob first) or by being consumed
/// wholesale on a successful submit.
///
/// Abandoning the flow with uploads already done leaves their blobs in the
/// store: nothing here deletes them. That orphan-producing gap is inherited
/// behavior, kept visible for the external sweep rather than patched over.
#[derive(Clone, Default)]
pub struct UploadSession {
    inner: Arc<Mutex<Vec<SessionImage>>>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SessionImage>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Atomically append one completed upload.
    pub fn append(&self, image: SessionImage) {
        self.lock().push(image);
    }

    /// Snapshot of the accumulated image references, in completion order.
    pub fn images(&self) -> Vec<ImageReference> {
        self.lock().iter().map(|img| img.reference.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove the entry for `name`, returning it if present.
    ///
    /// Callers delete the underlying blob first and only remove the entry
    /// once that delete succeeded.
    pub fn remove(&self, name: &str) -> Option<SessionImage> {
        let mut images = self.lock();
        let idx = images.iter().position(|img| img.reference.name == name)?;
        Some(images.remove(idx))
    }

    /// Consume the session wholesale, releasing all previews with it.
    pub fn take_all(&self) -> Vec<SessionImage> {
        std::mem::take(&mut *self.lock())
    }
}
