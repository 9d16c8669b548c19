//! SnapCast - Screen recording and video sharing, made simple.
//!
//! This crate implements the recording and upload core of the SnapCast
//! application: screen/microphone stream acquisition, audio mixing, the
//! recording session lifecycle, and the upload coordination sequence that
//! pushes a finished recording to the video CDN and persists its metadata.
//!
//! The host environment (media devices, identity provider, CDN, metadata
//! store) is reached through the traits in [`media`] and [`services`].

pub mod config;
pub mod error;
pub mod media;
pub mod recorder;
pub mod services;
pub mod upload;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorResponse};
pub use recorder::{RecordingArtifact, RecordingState, ScreenRecorder};
pub use upload::{UploadCoordinator, UploadDraft};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for the application.
///
/// Honors `RUST_LOG` when set, otherwise defaults to debug output for this
/// crate only.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapcast=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("SnapCast core v{}", env!("CARGO_PKG_VERSION"));
}
