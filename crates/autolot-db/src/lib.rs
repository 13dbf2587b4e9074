//! Document store abstraction, backends, and the typed listing repository.
//!
//! The document store is a remote service reached through the
//! [`DocumentStore`] trait: create with store-assigned ids, get by id,
//! equality-filtered queries, and deletes that treat absence as success.
//! [`ListingRepository`] layers the listing domain on top and guarantees that
//! records round-trip losslessly through serde.

pub mod factory;
pub mod listings;
#[cfg(feature = "docstore-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "docstore-rest")]
pub mod rest;
pub mod store;

// Re-export commonly used types
pub use factory::create_document_store;
pub use listings::{ListingRepository, LISTINGS_COLLECTION};
#[cfg(feature = "docstore-local")]
pub use local::LocalDocumentStore;
pub use memory::MemoryDocumentStore;
#[cfg(feature = "docstore-rest")]
pub use rest::RestDocumentStore;
pub use store::{Document, DocumentStore, Filter};
