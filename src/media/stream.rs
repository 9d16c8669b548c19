//! Stream and track handles
//!
//! A [`MediaStreamTrack`] models one hardware/media handle (a video feed or
//! an audio feed). Clones share the same underlying liveness flag, so
//! releasing a track through any clone is visible everywhere. This is what
//! the leak invariants of the recorder are checked against.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Kind of media a track carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

/// Handle to a single media track.
///
/// Cloning produces another handle to the same track; `stop` is idempotent.
#[derive(Debug, Clone)]
pub struct MediaStreamTrack {
    id: Uuid,
    kind: TrackKind,
    label: String,
    ended: Arc<AtomicBool>,
}

impl MediaStreamTrack {
    /// Create a new live track.
    pub fn new(kind: TrackKind, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            label: label.into(),
            ended: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a live video track.
    pub fn video(label: impl Into<String>) -> Self {
        Self::new(TrackKind::Video, label)
    }

    /// Create a live audio track.
    pub fn audio(label: impl Into<String>) -> Self {
        Self::new(TrackKind::Audio, label)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the underlying handle is still live.
    pub fn is_live(&self) -> bool {
        !self.ended.load(Ordering::SeqCst)
    }

    /// Release the underlying handle. Safe to call more than once.
    pub fn stop(&self) {
        if !self.ended.swap(true, Ordering::SeqCst) {
            tracing::debug!("Stopped {:?} track {} ({})", self.kind, self.id, self.label);
        }
    }
}

/// A set of tracks delivered together by the host.
#[derive(Debug, Clone)]
pub struct MediaStream {
    id: Uuid,
    tracks: Vec<MediaStreamTrack>,
}

impl MediaStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            tracks: Vec::new(),
        }
    }

    /// Create a stream from an initial set of tracks.
    pub fn with_tracks(tracks: Vec<MediaStreamTrack>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tracks,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn add_track(&mut self, track: MediaStreamTrack) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[MediaStreamTrack] {
        &self.tracks
    }

    /// Tracks of the given kind, in insertion order.
    pub fn tracks_of_kind(&self, kind: TrackKind) -> Vec<MediaStreamTrack> {
        self.tracks
            .iter()
            .filter(|t| t.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn video_tracks(&self) -> Vec<MediaStreamTrack> {
        self.tracks_of_kind(TrackKind::Video)
    }

    pub fn audio_tracks(&self) -> Vec<MediaStreamTrack> {
        self.tracks_of_kind(TrackKind::Audio)
    }

    /// Whether this stream carries any audio.
    pub fn has_audio(&self) -> bool {
        self.tracks.iter().any(|t| t.kind() == TrackKind::Audio)
    }

    /// Number of tracks still live.
    pub fn live_track_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_live()).count()
    }

    /// Release every track on this stream.
    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

impl Default for MediaStream {
    fn default() -> Self {
        Self::new()
    }
}
