//! Shared key generation for blob backends.
//!
//! Key format: `images/{owner_id}/{name}`.

use crate::traits::{StorageError, StorageResult};

/// Build the blob key for one listing image.
///
/// `name` must be a generated identifier, never a client-supplied file name.
pub fn image_key(owner_id: &str, name: &str) -> String {
    format!("images/{}/{}", owner_id, name)
}

/// Reject keys that could escape a backend's namespace.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
