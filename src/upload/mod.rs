//! Upload flow
//!
//! - [`UploadDraft`]: the user's pending submission (files + metadata) and
//!   its validation rules
//! - [`UploadCoordinator`]: the strict step-by-step sequence that turns a
//!   valid draft into a hosted video with a persisted metadata record

pub mod coordinator;
pub mod draft;

pub use coordinator::UploadCoordinator;
pub use draft::{UploadDraft, UploadFile};
