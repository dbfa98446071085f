//! Playback requests and the playback sink interface
//!
//! This crate does not make any noise by itself. Rendered
//! announcements are handed to a [`PlaybackSink`], which is
//! responsible for speech synthesis or audio playback. The sink
//! is also responsible for playing at most one announcement at
//! a time.
//!
//! Sinks have an explicit lifecycle. Acquire a
//! [`PlaybackSession`] to open the sink; the sink is closed when
//! the session is dropped.

use std::ops::{Deref, DerefMut};

use log::{debug, warn};
use thiserror::Error;

/// Something to play
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackRequest {
    /// Synthesize speech
    Speech(SpeechRequest),

    /// Play pre-recorded audio segments, in order
    Segments(AudioSegmentPlaylist),
}

/// A request for synthesized speech
#[derive(Clone, Debug, PartialEq)]
pub struct SpeechRequest {
    /// Sentence to speak
    pub text: String,

    /// Volume, from `0.0` (silent) to `1.0` (maximum)
    pub volume: f32,

    /// Speech rate: `1.0` is normal, `2.0` is double speed
    pub speech_rate: f32,

    /// Preferred synthesizer voice, if any
    pub voice_id: Option<String>,
}

/// An ordered list of audio segments
///
/// The playlist is also a cursor. The playback collaborator
/// calls [`next_segment()`](AudioSegmentPlaylist::next_segment)
/// each time the previous segment has finished playing.
///
/// ```
/// use pagecode::AudioSegmentPlaylist;
///
/// let mut playlist = AudioSegmentPlaylist::new(vec!["intro", "location_pit"], 0.8);
/// assert_eq!(2, playlist.remaining());
/// assert_eq!(Some("intro"), playlist.next_segment());
/// assert_eq!(Some("location_pit"), playlist.next_segment());
/// assert_eq!(None, playlist.next_segment());
///
/// playlist.rewind();
/// assert_eq!(Some("intro"), playlist.next_segment());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AudioSegmentPlaylist {
    segments: Vec<&'static str>,
    volume: f32,
    position: usize,
}

/// Error reported by a [`PlaybackSink`]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackError {
    /// The sink could not be opened
    #[error("playback sink unavailable: {0}")]
    Unavailable(String),

    /// The sink has not been opened
    #[error("playback sink is not open")]
    NotOpen,

    /// The sink failed to play a request
    #[error("playback failed: {0}")]
    Failed(String),
}

/// Destination for announcements
///
/// Implementations own any playback engine state, such as a
/// speech synthesizer handle or the current playlist. A sink
/// must be [`open`](PlaybackSink::open)ed before it can
/// [`play`](PlaybackSink::play), and it must release its
/// resources on [`close`](PlaybackSink::close).
///
/// Each call to `play` replaces whatever was playing before.
pub trait PlaybackSink {
    /// Acquire playback resources
    ///
    /// Opening a sink which is already open is not an error.
    fn open(&mut self) -> Result<(), PlaybackError>;

    /// Play an announcement
    fn play(&mut self, request: &PlaybackRequest) -> Result<(), PlaybackError>;

    /// Stop playback and release resources
    fn close(&mut self);
}

/// An open [`PlaybackSink`]
///
/// The sink is opened when the session is created and closed
/// when the session is dropped.
#[derive(Debug)]
pub struct PlaybackSession<'s, S>
where
    S: PlaybackSink + ?Sized,
{
    sink: &'s mut S,
}

impl PlaybackRequest {
    /// Volume, from `0.0` to `1.0`
    pub fn volume(&self) -> f32 {
        match self {
            Self::Speech(speech) => speech.volume,
            Self::Segments(playlist) => playlist.volume(),
        }
    }

    /// Request kind, like "`speech`"
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Speech(_) => "speech",
            Self::Segments(_) => "segments",
        }
    }
}

impl SpeechRequest {
    /// Speak `text` at full volume, normal speed, default voice
    pub fn new<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            text: text.into(),
            volume: 1.0,
            speech_rate: 1.0,
            voice_id: None,
        }
    }
}

impl AudioSegmentPlaylist {
    /// New playlist at the given `volume`
    ///
    /// The volume is clamped to `0.0 ..= 1.0`.
    pub fn new(segments: Vec<&'static str>, volume: f32) -> Self {
        Self {
            segments,
            volume: clamp_volume(volume),
            position: 0,
        }
    }

    /// All segments, in playback order
    pub fn segments(&self) -> &[&'static str] {
        &self.segments
    }

    /// Playback volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Advance to the next segment
    ///
    /// Returns `None` once every segment has been played.
    pub fn next_segment(&mut self) -> Option<&'static str> {
        let out = self.segments.get(self.position).copied()?;
        self.position += 1;
        Some(out)
    }

    /// Number of segments not yet played
    pub fn remaining(&self) -> usize {
        self.segments.len() - self.position
    }

    /// Restart from the first segment
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// True if the playlist has no segments at all
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Iterator for AudioSegmentPlaylist {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_segment()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl<'s, S> PlaybackSession<'s, S>
where
    S: PlaybackSink + ?Sized,
{
    /// Open the `sink`
    pub fn open(sink: &'s mut S) -> Result<Self, PlaybackError> {
        sink.open()?;
        debug!("playback session opened");
        Ok(Self { sink })
    }
}

impl<'s, S> Deref for PlaybackSession<'s, S>
where
    S: PlaybackSink + ?Sized,
{
    type Target = S;

    fn deref(&self) -> &S {
        self.sink
    }
}

impl<'s, S> DerefMut for PlaybackSession<'s, S>
where
    S: PlaybackSink + ?Sized,
{
    fn deref_mut(&mut self) -> &mut S {
        self.sink
    }
}

impl<'s, S> Drop for PlaybackSession<'s, S>
where
    S: PlaybackSink + ?Sized,
{
    fn drop(&mut self) {
        self.sink.close();
        debug!("playback session closed");
    }
}

// Clamp volume to the unit interval; NaN is silent
pub(crate) fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        warn!("volume is NaN; muting");
        0.0
    } else {
        f32::clamp(volume, 0.0, 1.0)
    }
}
