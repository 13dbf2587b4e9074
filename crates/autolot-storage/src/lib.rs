//! Blob storage abstraction and backends for listing images.
//!
//! # Key format
//!
//! Blob keys are owner-scoped: `images/{owner_id}/{name}`, where `name` is a
//! generated identifier. All backends use the same layout; generation and
//! validation are centralized in the [`keys`] module so they stay consistent.
//!
//! Keys must not contain `..` or a leading `/`.
//!
//! # Delete semantics
//!
//! Every backend treats deletion of an absent key as success. Once a listing
//! record is gone, re-deleting its blobs must be a no-op, never an error.

pub mod factory;
pub mod keys;
#[cfg(feature = "store-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "store-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_blob_store;
#[cfg(feature = "store-local")]
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
#[cfg(feature = "store-s3")]
pub use s3::S3BlobStore;
pub use traits::{BlobStore, StorageError, StorageResult};
