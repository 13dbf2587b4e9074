//! Error types module
//!
//! All domain errors are unified under the [`AppError`] enum. Store-facing
//! crates define their own error types and convert at the crate seam.
//!
//! Partial failure during a lifecycle delete is not an error value at all:
//! per-image delete failures are aggregated into a report and the overall
//! operation still succeeds. "Not found" on any delete path is treated as
//! success and never surfaces here.

use thiserror::Error;

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected before any store contact: payload is not an allowed image type.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// Rejected before any store contact: empty required field, malformed
    /// whatsapp number, or a structurally invalid argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Submit attempted with zero uploaded images.
    #[error("A listing requires at least one image")]
    MissingAssets,

    /// The blob store rejected a write. No automatic retry; callers re-invoke.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// The document store rejected a write. No automatic retry.
    #[error("Store write failed: {0}")]
    StoreWrite(String),

    /// A delete failed for a reason other than absence.
    #[error("Store delete failed: {0}")]
    StoreDelete(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The operation observed its cancellation token before contacting a store.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this is a pre-store-contact validation rejection.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidContentType(_) | AppError::InvalidInput(_) | AppError::MissingAssets
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_classification() {
        assert!(AppError::MissingAssets.is_validation());
        assert!(AppError::InvalidContentType("image/gif".to_string()).is_validation());
        assert!(!AppError::StoreWrite("boom".to_string()).is_validation());
        assert!(!AppError::Cancelled.is_validation());
    }
}
