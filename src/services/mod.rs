//! External service collaborators
//!
//! Each collaborator sits behind a trait so the upload flow can be tested
//! without the network:
//! - identity/session provider ([`auth`])
//! - video hosting service ([`hosting`])
//! - thumbnail object storage ([`storage`])
//! - video metadata store ([`metadata`])
//! - per-user save rate limiting ([`rate_limit`])

pub mod auth;
pub mod hosting;
pub mod metadata;
pub mod rate_limit;
pub mod storage;

pub use auth::{SessionProvider, UserSession};
pub use hosting::{BunnyStreamClient, VideoHost};
pub use metadata::{
    InMemoryMetadataStore, MetadataStore, Pagination, SortFilter, VideoPage, VideoQuery,
    VideoRecord, Visibility,
};
pub use rate_limit::FixedWindowLimiter;
pub use storage::{thumbnail_target, BunnyStorageClient, ObjectStorage, ThumbnailTarget};
