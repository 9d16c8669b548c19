//! Stream combiner
//!
//! Assembles the recordable stream for a session: exactly one video track
//! from the display capture plus at most one (mixed) audio track. The
//! combined stream keeps the original source streams as an explicit
//! back-reference so teardown can release every handle, including tracks
//! that never made it into the combined stream.

use super::stream::{MediaStream, MediaStreamTrack};
use crate::error::{AppError, AppResult};

/// The recordable stream plus the source streams it was built from.
#[derive(Debug)]
pub struct CombinedStream {
    /// The stream handed to the recorder.
    stream: MediaStream,

    /// Source streams, kept strictly for release on teardown.
    original_streams: Vec<MediaStream>,
}

impl CombinedStream {
    pub fn stream(&self) -> &MediaStream {
        &self.stream
    }

    pub fn original_streams(&self) -> &[MediaStream] {
        &self.original_streams
    }

    /// Live tracks across the combined stream and every original stream.
    ///
    /// Tracks shared between them are counted once per handle set they
    /// appear in; a fully released session reports zero either way.
    pub fn live_track_count(&self) -> usize {
        self.stream.live_track_count()
            + self
                .original_streams
                .iter()
                .map(|s| s.live_track_count())
                .sum::<usize>()
    }

    /// Release every track on the combined stream and on each original
    /// source stream.
    pub fn stop_all(&self) {
        self.stream.stop_all();
        for source in &self.original_streams {
            source.stop_all();
        }
    }
}

/// Assemble a combined stream from display capture and an optional mixed
/// audio track.
///
/// Fails if the display stream has no video track; produces exactly one
/// video track and at most one audio track.
pub fn combine_streams(
    display: &MediaStream,
    mixed_audio: Option<MediaStreamTrack>,
    original_streams: Vec<MediaStream>,
) -> AppResult<CombinedStream> {
    let video = display
        .video_tracks()
        .into_iter()
        .next()
        .ok_or_else(|| AppError::capture_unavailable("display stream has no video track"))?;

    let mut stream = MediaStream::new();
    stream.add_track(video);
    if let Some(audio) = mixed_audio {
        stream.add_track(audio);
    }

    Ok(CombinedStream {
        stream,
        original_streams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::stream::TrackKind;

    #[test]
    fn test_combined_shape() {
        let mut display = MediaStream::new();
        display.add_track(MediaStreamTrack::video("screen"));
        display.add_track(MediaStreamTrack::audio("system"));
        let audio = MediaStreamTrack::audio("mixed");

        let combined =
            combine_streams(&display, Some(audio), vec![display.clone()]).unwrap();

        let tracks = combined.stream().tracks();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].kind(), TrackKind::Video);
        assert_eq!(tracks[1].kind(), TrackKind::Audio);
        assert_eq!(combined.original_streams().len(), 1);
    }

    #[test]
    fn test_requires_video_track() {
        let display = MediaStream::with_tracks(vec![MediaStreamTrack::audio("system")]);
        let err = combine_streams(&display, None, vec![]).unwrap_err();
        assert!(matches!(err, AppError::CaptureUnavailable(_)));
    }

    #[test]
    fn test_stop_all_releases_originals_too() {
        let mut display = MediaStream::new();
        display.add_track(MediaStreamTrack::video("screen"));
        // System audio track that is mixed, not added to the combined stream
        display.add_track(MediaStreamTrack::audio("system"));
        let mic = MediaStream::with_tracks(vec![MediaStreamTrack::audio("mic")]);

        let combined = combine_streams(
            &display,
            Some(MediaStreamTrack::audio("mixed")),
            vec![display.clone(), mic.clone()],
        )
        .unwrap();

        assert!(combined.live_track_count() > 0);
        combined.stop_all();
        assert_eq!(combined.live_track_count(), 0);
        assert_eq!(display.live_track_count(), 0);
        assert_eq!(mic.live_track_count(), 0);
    }
}
