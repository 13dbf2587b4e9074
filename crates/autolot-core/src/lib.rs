//! Core domain types for the autolot marketplace client.
//!
//! This crate holds the data model shared by every other crate: listing
//! records and their image references, the error taxonomy, input validation,
//! and environment-driven configuration. It has no knowledge of any concrete
//! store backend.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use config::{Config, DocStoreBackend, StorageBackend};
pub use error::{AppError, AppResult};
