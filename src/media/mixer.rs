//! Audio mixing
//!
//! Combines up to two audio sources (display/system audio and microphone)
//! into a single output track via a graph of gain and merge nodes owned by
//! an [`AudioContext`]. With a single source no graph is built at all: the
//! source track passes through unmodified, so a plain screen recording
//! pays no mixing cost.

use super::stream::{MediaStream, MediaStreamTrack};
use uuid::Uuid;

/// Lifecycle state of an audio-processing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioContextState {
    Running,
    Closed,
}

/// One node in the mix graph.
#[derive(Debug, Clone)]
pub enum AudioNode {
    /// Gain-controlled input fed by one source track.
    Gain { source: Uuid, gain: f32 },

    /// Merge point combining multiple inputs into the output track.
    Merger { inputs: Vec<Uuid> },
}

/// Audio-processing context owned by one recording session.
///
/// Holds the node graph built for that session; must be closed when the
/// session ends.
#[derive(Debug)]
pub struct AudioContext {
    state: AudioContextState,
    nodes: Vec<AudioNode>,
}

impl AudioContext {
    pub fn new() -> Self {
        Self {
            state: AudioContextState::Running,
            nodes: Vec::new(),
        }
    }

    pub fn state(&self) -> AudioContextState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == AudioContextState::Closed
    }

    pub fn nodes(&self) -> &[AudioNode] {
        &self.nodes
    }

    fn add_node(&mut self, node: AudioNode) {
        self.nodes.push(node);
    }

    /// Close the context, releasing its processing resources. Idempotent.
    pub fn close(&mut self) {
        if self.state == AudioContextState::Running {
            self.state = AudioContextState::Closed;
            tracing::debug!("Closed audio context ({} nodes)", self.nodes.len());
        }
    }
}

impl Default for AudioContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the mixed audio output for a recording session.
///
/// - no audio sources: returns `None` (video-only recording)
/// - one source: returns that track unchanged, no nodes created
/// - two sources: unit-gain input node per source, one merger, one new
///   output track
pub fn create_audio_mixer(
    ctx: &mut AudioContext,
    display: &MediaStream,
    microphone: Option<&MediaStream>,
    has_display_audio: bool,
) -> Option<MediaStreamTrack> {
    let display_audio = if has_display_audio {
        display.audio_tracks().into_iter().next()
    } else {
        None
    };
    let mic_audio = microphone.and_then(|s| s.audio_tracks().into_iter().next());

    match (display_audio, mic_audio) {
        (None, None) => None,
        (Some(track), None) | (None, Some(track)) => {
            // Single source: pass through without any processing.
            Some(track)
        }
        (Some(display_track), Some(mic_track)) => {
            ctx.add_node(AudioNode::Gain {
                source: display_track.id(),
                gain: 1.0,
            });
            ctx.add_node(AudioNode::Gain {
                source: mic_track.id(),
                gain: 1.0,
            });
            ctx.add_node(AudioNode::Merger {
                inputs: vec![display_track.id(), mic_track.id()],
            });

            let output = MediaStreamTrack::audio("mixed");
            tracing::debug!(
                "Mixing display audio {} with microphone {} into {}",
                display_track.id(),
                mic_track.id(),
                output.id()
            );
            Some(output)
        }
    }
}
