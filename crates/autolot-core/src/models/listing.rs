use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ImageReference;

/// One marketplace listing as persisted in the document store.
///
/// `id` is assigned by the store on create and immutable afterwards, as is
/// `owner_id`. `name` is stored upper-cased; every other scalar is persisted
/// verbatim. A record never exists in the store with an empty `images`
/// sequence; the composer refuses to write one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    pub owner_id: String,
    pub owner_name: Option<String>,
    pub name: String,
    pub model: String,
    pub year: String,
    pub km: String,
    pub price: String,
    pub city: String,
    pub whatsapp: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub images: Vec<ImageReference>,
}

/// A listing ready to be written; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub owner_id: String,
    pub owner_name: Option<String>,
    pub name: String,
    pub model: String,
    pub year: String,
    pub km: String,
    pub price: String,
    pub city: String,
    pub whatsapp: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub images: Vec<ImageReference>,
}

impl NewListing {
    /// Attach the store-assigned id, completing the record.
    pub fn into_record(self, id: String) -> ListingRecord {
        ListingRecord {
            id,
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            name: self.name,
            model: self.model,
            year: self.year,
            km: self.km,
            price: self.price,
            city: self.city,
            whatsapp: self.whatsapp,
            description: self.description,
            created_at: self.created_at,
            images: self.images,
        }
    }
}
