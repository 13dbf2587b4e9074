//! Input validation: listing form fields and image content types.
//!
//! Everything here runs before any store is contacted; a rejection from this
//! module guarantees zero remote calls were made.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;
use crate::models::ListingForm;

/// Content types accepted for listing images.
pub const ALLOWED_IMAGE_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

static WHATSAPP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{11,12}$").expect("whatsapp pattern is valid"));

/// Normalize a MIME type by stripping parameters and case
/// (e.g. "image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Reject payloads that are not jpeg or png.
pub fn validate_image_content_type(content_type: &str) -> Result<(), AppError> {
    let normalized = normalize_content_type(content_type);
    if ALLOWED_IMAGE_CONTENT_TYPES.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(AppError::InvalidContentType(content_type.to_string()))
    }
}

/// Validate all required form fields.
///
/// Every scalar must be non-empty after trimming; whatsapp must additionally
/// be purely numeric with 11 or 12 digits.
pub fn validate_listing_form(form: &ListingForm) -> Result<(), AppError> {
    require_non_empty("name", &form.name)?;
    require_non_empty("model", &form.model)?;
    require_non_empty("year", &form.year)?;
    require_non_empty("km", &form.km)?;
    require_non_empty("price", &form.price)?;
    require_non_empty("city", &form.city)?;
    require_non_empty("whatsapp", &form.whatsapp)?;
    require_non_empty("description", &form.description)?;

    if !WHATSAPP_RE.is_match(&form.whatsapp) {
        return Err(AppError::InvalidInput(
            "whatsapp must be 11 to 12 digits".to_string(),
        ));
    }

    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}
