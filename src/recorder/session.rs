//! Recording session lifecycle
//!
//! [`ScreenRecorder`] owns everything one recording session needs: the
//! combined stream, the source streams behind it, the audio context, the
//! chunk buffer, and the start timestamp. At most one session is active at
//! a time; starting a new one first fully releases the previous session's
//! handles.

use super::state::{RecorderOptions, RecordingArtifact, RecordingState};
use crate::error::AppResult;
use crate::media::{
    acquire_streams, combine_streams, create_audio_mixer, AudioContext, CombinedStream,
    MediaDevices,
};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

/// Container MIME type for chunked recordings.
const RECORDING_MIME_TYPE: &str = "video/webm";

/// Events emitted by the recorder
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    /// Recording started
    Started,
    /// Recording stopped, artifact available
    Stopped,
    /// Start failed
    Error(String),
}

/// State owned by an active recording session.
struct ActiveSession {
    /// The recordable stream plus its source-stream back-references.
    combined: CombinedStream,

    /// Audio-processing context created for this session.
    audio_context: AudioContext,

    /// Buffered chunks, in arrival order.
    chunks: Vec<Vec<u8>>,

    /// When the session started.
    started_at: Instant,
}

/// Owns the recording session lifecycle.
pub struct ScreenRecorder {
    /// Host capture subsystem.
    devices: Box<dyn MediaDevices>,

    /// Current recording state.
    state: Arc<RwLock<RecordingState>>,

    /// Chunking options handed to the host on start.
    options: RecorderOptions,

    /// The active session, if any.
    session: Option<ActiveSession>,

    /// The last finished recording.
    artifact: Option<RecordingArtifact>,

    /// Event broadcaster.
    event_tx: broadcast::Sender<RecorderEvent>,
}

impl ScreenRecorder {
    /// Create a recorder on top of the host capture subsystem.
    pub fn new(devices: Box<dyn MediaDevices>) -> Self {
        Self::with_options(devices, RecorderOptions::default())
    }

    pub fn with_options(devices: Box<dyn MediaDevices>, options: RecorderOptions) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            devices,
            state: Arc::new(RwLock::new(RecordingState::Idle)),
            options,
            session: None,
            artifact: None,
            event_tx,
        }
    }

    /// Get the current recording state
    pub fn state(&self) -> RecordingState {
        *self.state.read()
    }

    pub fn is_recording(&self) -> bool {
        self.state() == RecordingState::Recording
    }

    /// Chunking options the host capture subsystem should honor.
    pub fn options(&self) -> RecorderOptions {
        self.options
    }

    /// Subscribe to recorder events
    pub fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        self.event_tx.subscribe()
    }

    /// The last finished recording, if any.
    pub fn recording(&self) -> Option<&RecordingArtifact> {
        self.artifact.as_ref()
    }

    /// Duration of the last finished recording, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.artifact
            .as_ref()
            .map(|a| a.duration_seconds())
            .unwrap_or(0.0)
    }

    /// Start a new recording session.
    ///
    /// Any previous session is stopped and released first. Failures
    /// (permission denied, no capture device) are logged and surfaced as
    /// `false`; no stream acquired on the failing path stays open.
    pub async fn start(&mut self, with_mic: bool) -> bool {
        // At most one active session: release the previous one first.
        self.stop();

        match self.try_start(with_mic).await {
            Ok(()) => {
                tracing::info!(
                    "Recording started (mic: {}, chunk interval: {}ms)",
                    with_mic,
                    self.options.chunk_interval_ms
                );
                true
            }
            Err(e) => {
                tracing::error!("Recording error: {}", e);
                let _ = self.event_tx.send(RecorderEvent::Error(e.to_string()));
                false
            }
        }
    }

    async fn try_start(&mut self, with_mic: bool) -> AppResult<()> {
        let acquired = acquire_streams(self.devices.as_ref(), with_mic).await?;

        let mut audio_context = AudioContext::new();
        let mixed = create_audio_mixer(
            &mut audio_context,
            &acquired.display,
            acquired.microphone.as_ref(),
            acquired.has_display_audio,
        );

        let mut original_streams = vec![acquired.display.clone()];
        if let Some(mic) = &acquired.microphone {
            original_streams.push(mic.clone());
        }

        let combined = match combine_streams(&acquired.display, mixed, original_streams) {
            Ok(combined) => combined,
            Err(e) => {
                // Release everything acquired before the failure.
                acquired.display.stop_all();
                if let Some(mic) = &acquired.microphone {
                    mic.stop_all();
                }
                audio_context.close();
                return Err(e);
            }
        };

        self.session = Some(ActiveSession {
            combined,
            audio_context,
            chunks: Vec::new(),
            started_at: Instant::now(),
        });
        *self.state.write() = RecordingState::Recording;
        let _ = self.event_tx.send(RecorderEvent::Started);
        Ok(())
    }

    /// Append a chunk delivered by the host capture subsystem.
    ///
    /// Chunks are buffered in arrival order; empty chunks are dropped.
    /// Ignored unless a recording is in progress.
    pub fn push_chunk(&mut self, data: Vec<u8>) {
        if self.state() != RecordingState::Recording {
            return;
        }
        if data.is_empty() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.chunks.push(data);
        }
    }

    /// Stop the active recording session.
    ///
    /// Concatenates buffered chunks into the finished artifact, releases
    /// every track on the combined stream and its source streams, and
    /// closes the audio context. No-op when idle.
    pub fn stop(&mut self) -> Option<&RecordingArtifact> {
        let mut session = self.session.take()?;

        let duration = session.started_at.elapsed();
        let total: usize = session.chunks.iter().map(|c| c.len()).sum();
        let mut data = Vec::with_capacity(total);
        for chunk in &session.chunks {
            data.extend_from_slice(chunk);
        }

        session.combined.stop_all();
        session.audio_context.close();

        self.artifact = Some(RecordingArtifact {
            data,
            mime_type: RECORDING_MIME_TYPE.to_string(),
            duration,
        });
        *self.state.write() = RecordingState::Idle;
        let _ = self.event_tx.send(RecorderEvent::Stopped);

        tracing::info!(
            "Recording stopped: {} bytes over {:.1}s",
            total,
            duration.as_secs_f64()
        );
        self.artifact.as_ref()
    }

    /// Clear the finished artifact and its duration. Safe in any state.
    pub fn reset(&mut self) {
        self.artifact = None;
    }
}
