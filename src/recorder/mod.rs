//! Recording system module
//!
//! Implements the recording session lifecycle:
//! - RecordingState machine (idle/recording)
//! - ScreenRecorder owning the session's streams, audio context, and
//!   chunk buffer
//! - RecordingArtifact produced on stop

pub mod session;
pub mod state;

pub use session::{RecorderEvent, ScreenRecorder};
pub use state::{RecorderOptions, RecordingArtifact, RecordingState};
