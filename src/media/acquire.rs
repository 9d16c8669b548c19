//! Media stream acquisition
//!
//! The [`MediaDevices`] trait is the boundary to the host capture
//! subsystem. [`acquire_streams`] turns it into the set of streams one
//! recording session needs: the display stream, an optional microphone
//! stream, and whether the display brought its own audio.

use super::stream::MediaStream;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;

/// Host-provided capture sources.
///
/// Implementations are free to prompt for permission, pick devices, etc.
/// Any refusal or missing device should surface as an error; the caller
/// maps it to a capture-unavailable failure.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Request a display-capture stream: one video track, plus an audio
    /// track when the host offers system-audio capture.
    async fn display_media(&self) -> AppResult<MediaStream>;

    /// Request a microphone audio stream.
    async fn user_media(&self) -> AppResult<MediaStream>;
}

/// Streams acquired for one recording session.
#[derive(Debug)]
pub struct AcquiredStreams {
    /// Display capture (video, maybe system audio).
    pub display: MediaStream,

    /// Microphone stream, when requested and granted.
    pub microphone: Option<MediaStream>,

    /// Whether the display stream carries its own audio track.
    pub has_display_audio: bool,
}

/// Acquire the streams for a recording session.
///
/// If the microphone request fails after display capture succeeded, the
/// display tracks are released before the error propagates; a failure here
/// never leaves a partially-acquired stream open.
pub async fn acquire_streams(
    devices: &dyn MediaDevices,
    with_mic: bool,
) -> AppResult<AcquiredStreams> {
    let display = devices
        .display_media()
        .await
        .map_err(|e| AppError::capture_unavailable(format!("display capture: {}", e)))?;

    let has_display_audio = display.has_audio();

    let microphone = if with_mic {
        match devices.user_media().await {
            Ok(stream) => Some(stream),
            Err(e) => {
                display.stop_all();
                return Err(AppError::capture_unavailable(format!(
                    "microphone capture: {}",
                    e
                )));
            }
        }
    } else {
        None
    };

    Ok(AcquiredStreams {
        display,
        microphone,
        has_display_audio,
    })
}
