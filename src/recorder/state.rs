//! Recording state management
//!
//! Defines the recording state machine and the artifact a finished
//! session produces.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current state of the recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    /// No recording in progress
    Idle,
    /// Currently recording
    Recording,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Options for starting a recording
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderOptions {
    /// Interval at which the host capture subsystem should emit chunks
    pub chunk_interval_ms: u64,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            chunk_interval_ms: 1000,
        }
    }
}

/// A finished recording: the concatenated chunk data plus its duration.
#[derive(Debug, Clone)]
pub struct RecordingArtifact {
    /// Chunk bytes concatenated in arrival order.
    pub data: Vec<u8>,

    /// Container MIME type of the recording.
    pub mime_type: String,

    /// Wall-clock duration from start to stop.
    pub duration: Duration,
}

impl RecordingArtifact {
    /// Duration in whole-ish seconds, as surfaced to the upload flow.
    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Write the recording to disk and return its path, so the frontend
    /// can preview it before upload.
    pub fn save_to(&self, path: &Path) -> std::io::Result<PathBuf> {
        std::fs::write(path, &self.data)?;
        Ok(path.to_path_buf())
    }
}
