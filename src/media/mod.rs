//! Media stream model and assembly
//!
//! This module provides the pieces a recording session is built from:
//! - track/stream handles with observable release ([`stream`])
//! - display/microphone acquisition behind the host boundary ([`acquire`])
//! - the audio mix graph ([`mixer`])
//! - combined-stream assembly and teardown ([`combiner`])

pub mod acquire;
pub mod combiner;
pub mod mixer;
pub mod stream;

pub use acquire::{acquire_streams, AcquiredStreams, MediaDevices};
pub use combiner::{combine_streams, CombinedStream};
pub use mixer::{create_audio_mixer, AudioContext, AudioContextState};
pub use stream::{MediaStream, MediaStreamTrack, TrackKind};
