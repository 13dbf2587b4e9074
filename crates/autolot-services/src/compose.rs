//! Listing composition: one record write from a validated form plus the
//! session's accumulated image references.

use crate::context::ClientContext;
use crate::session::UploadSession;
use autolot_core::models::{ListingForm, ListingRecord, NewListing};
use autolot_core::validation::validate_listing_form;
use autolot_core::AppError;
use chrono::Utc;

/// Turns a validated form and a non-empty upload session into one listing
/// record.
pub struct ListingComposer {
    ctx: ClientContext,
}

impl ListingComposer {
    pub fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Compose and persist a listing.
    ///
    /// Never writes a record without images: an empty session fails with
    /// `MissingAssets` before the document store is contacted. Exactly one
    /// store write happens; on success the session is consumed (previews
    /// released with it), on failure it is left untouched so the user can
    /// retry the write without re-uploading.
    pub async fn submit(
        &self,
        form: &ListingForm,
        session: &UploadSession,
    ) -> Result<ListingRecord, AppError> {
        validate_listing_form(form)?;

        if session.is_empty() {
            return Err(AppError::MissingAssets);
        }

        let listing = NewListing {
            owner_id: self.ctx.identity.id.clone(),
            owner_name: self.ctx.identity.display_name.clone(),
            name: form.name.to_uppercase(),
            model: form.model.clone(),
            year: form.year.clone(),
            km: form.km.clone(),
            price: form.price.clone(),
            city: form.city.clone(),
            whatsapp: form.whatsapp.clone(),
            description: form.description.clone(),
            created_at: Utc::now(),
            images: session.images(),
        };

        let record = self.ctx.listings.create(listing).await?;

        // Consumed only after the write lands.
        drop(session.take_all());

        tracing::info!(
            listing_id = %record.id,
            image_count = record.images.len(),
            "Listing created"
        );

        Ok(record)
    }
}
