//! Explicit per-identity context carrying the store collaborators.

use autolot_core::models::Identity;
use autolot_core::AppError;
use autolot_db::ListingRepository;
use autolot_storage::BlobStore;
use std::sync::Arc;

use crate::identity::IdentityProvider;

/// Everything the listing flows need, constructed once at application start
/// and passed into every component.
///
/// Identity changes are handled by building a fresh context rather than by
/// mutating shared state: subscribe to the provider, and on change call
/// [`ClientContext::for_identity`] again.
#[derive(Clone)]
pub struct ClientContext {
    pub identity: Identity,
    pub listings: ListingRepository,
    pub blobs: Arc<dyn BlobStore>,
}

impl ClientContext {
    pub fn new(identity: Identity, listings: ListingRepository, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            identity,
            listings,
            blobs,
        }
    }

    /// Build a context for the provider's current identity; fails when
    /// signed out, since every store operation is owner-partitioned.
    pub fn for_identity(
        provider: &dyn IdentityProvider,
        listings: ListingRepository,
        blobs: Arc<dyn BlobStore>,
    ) -> Result<Self, AppError> {
        let identity = provider
            .current()
            .ok_or_else(|| AppError::Unauthorized("No signed-in identity".to_string()))?;
        Ok(Self::new(identity, listings, blobs))
    }

    /// The same collaborators bound to a different identity.
    pub fn with_identity(&self, identity: Identity) -> Self {
        Self {
            identity,
            listings: self.listings.clone(),
            blobs: self.blobs.clone(),
        }
    }
}
