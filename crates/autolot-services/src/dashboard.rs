//! Owner dashboard view reconciliation.

use crate::context::ClientContext;
use autolot_core::models::ListingRecord;
use autolot_core::AppError;

/// Shown when a record unexpectedly has no images.
pub const COVER_PLACEHOLDER_URL: &str = "/assets/placeholder-vehicle.svg";

/// One listing as rendered on the owner dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub id: String,
    pub name: String,
    pub year: String,
    pub km: String,
    pub price: String,
    pub city: String,
    cover: Option<String>,
}

impl ListingCard {
    fn from_record(record: &ListingRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            year: record.year.clone(),
            km: record.km.clone(),
            price: record.price.clone(),
            city: record.city.clone(),
            // The composer never writes a record without images, but one can
            // still show up malformed; render a placeholder instead of
            // indexing a nonexistent first element.
            cover: record.images.first().map(|image| image.url.clone()),
        }
    }

    /// Cover image URL, or the placeholder for a record without images.
    pub fn cover_url(&self) -> &str {
        self.cover.as_deref().unwrap_or(COVER_PLACEHOLDER_URL)
    }

    pub fn has_cover(&self) -> bool {
        self.cover.is_some()
    }
}

/// Local view of the current owner's listings.
///
/// `refresh` replaces the list wholesale from an owner-scoped query; there is
/// no incremental merge — a fresh query always supersedes prior local state.
#[derive(Default)]
pub struct DashboardView {
    cards: Vec<ListingCard>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the view from the document store.
    pub async fn refresh(&mut self, ctx: &ClientContext) -> Result<(), AppError> {
        let records = ctx.listings.list_by_owner(&ctx.identity.id).await?;
        self.cards = records.iter().map(ListingCard::from_record).collect();
        Ok(())
    }

    /// Drop a card immediately once its record deletion succeeded, without
    /// waiting on image-deletion outcomes.
    pub fn remove(&mut self, listing_id: &str) {
        self.cards.retain(|card| card.id != listing_id);
    }

    pub fn cards(&self) -> &[ListingCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
