use serde::{Deserialize, Serialize};

/// Raw create-listing form input.
///
/// All scalar fields are required; validation lives in [`crate::validation`].
/// The form carries no image data — images are uploaded separately and
/// accumulated in the client's upload session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingForm {
    pub name: String,
    pub model: String,
    pub year: String,
    pub km: String,
    pub price: String,
    pub city: String,
    pub whatsapp: String,
    pub description: String,
}
