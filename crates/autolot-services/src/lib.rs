//! Client-side services for the autolot marketplace.
//!
//! This crate holds the listing asset lifecycle: uploading images into a
//! client-local session, composing a validated form plus the session into one
//! listing record, deleting a record together with its blobs, and reconciling
//! the owner dashboard from the document store.
//!
//! The two stores fail independently and there is no cross-store transaction.
//! The invariants the services enforce instead:
//!
//! - a listing record is never written without at least one image reference;
//! - a lifecycle delete removes the record first, then best-effort deletes
//!   the blobs, reporting partial failure rather than rolling back;
//! - "not found" on any delete is success.

pub mod compose;
pub mod context;
pub mod dashboard;
pub mod identity;
pub mod lifecycle;
pub mod session;
pub mod task;
pub mod upload;

pub use compose::ListingComposer;
pub use context::ClientContext;
pub use dashboard::{DashboardView, ListingCard, COVER_PLACEHOLDER_URL};
pub use identity::{IdentityProvider, LocalIdentityProvider};
pub use lifecycle::{DeleteReport, ImageDeleteFailure, ListingLifecycleManager};
pub use session::{PreviewHandle, SessionImage, UploadSession};
pub use task::TaskHandle;
pub use upload::{AssetUploader, ImagePayload, UploadedImage};
