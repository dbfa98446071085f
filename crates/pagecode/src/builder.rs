use crate::announcement::OutputMode;
use crate::pager::Pager;
use crate::playback::clamp_volume;

/// Builds a [`Pager`]
///
/// The builder comes with the defaults that the pit crew uses:
/// full volume, slightly faster-than-normal speech, and the
/// `en-us-x-iom-local` voice.
///
/// ```
/// use pagecode::{OutputMode, PagerBuilder};
///
/// let pager = PagerBuilder::new()
///     .with_output_mode(OutputMode::Segments)
///     .with_volume(0.8)
///     .with_segment_note_fallback(true)
///     .build();
/// assert_eq!(OutputMode::Segments, pager.output_mode());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PagerBuilder {
    enabled: bool,
    output_mode: OutputMode,
    volume: f32,
    speech_rate: f32,
    voice_id: Option<String>,
    segment_note_fallback: bool,
}

impl PagerBuilder {
    /// New pager configuration with defaults
    pub fn new() -> Self {
        Self {
            enabled: true,
            output_mode: OutputMode::Speech,
            volume: 1.0,
            speech_rate: 1.15,
            voice_id: Some(Self::DEFAULT_VOICE.to_owned()),
            segment_note_fallback: false,
        }
    }

    /// Build the pager
    ///
    /// The pager is immediately ready to handle messages.
    pub fn build(&self) -> Pager {
        Pager::from(self)
    }

    /// Enable or disable paging
    ///
    /// A disabled pager ignores every message. Paging can also
    /// be toggled after the pager is built.
    pub fn with_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    /// Announce as speech or as audio segments
    pub fn with_output_mode(&mut self, mode: OutputMode) -> &mut Self {
        self.output_mode = mode;
        self
    }

    /// Playback volume, from `0.0` to `1.0`
    ///
    /// Out-of-range volumes are clamped.
    pub fn with_volume(&mut self, volume: f32) -> &mut Self {
        self.volume = clamp_volume(volume);
        self
    }

    /// Speech rate, where `1.0` is normal speed
    ///
    /// The rate is clamped to `0.1 ..= 4.0`.
    pub fn with_speech_rate(&mut self, rate: f32) -> &mut Self {
        self.speech_rate = if rate.is_nan() {
            1.0
        } else {
            f32::clamp(rate, Self::MIN_SPEECH_RATE, Self::MAX_SPEECH_RATE)
        };
        self
    }

    /// Preferred speech synthesizer voice
    ///
    /// Use `None` to let the synthesizer choose.
    pub fn with_voice<S>(&mut self, voice_id: Option<S>) -> &mut Self
    where
        S: Into<String>,
    {
        self.voice_id = voice_id.map(Into::into);
        self
    }

    /// Speak pages with notes even in segments mode
    ///
    /// Free-text notes have no audio segment. If `true`, a page
    /// with a note is announced as speech even when the output
    /// mode is [`OutputMode::Segments`]. If `false` (the
    /// default), the note is dropped from the playlist and a
    /// warning is logged.
    pub fn with_segment_note_fallback(&mut self, fallback: bool) -> &mut Self {
        self.segment_note_fallback = fallback;
        self
    }

    /// Paging enabled at start
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Speech or audio segments
    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Playback volume (0.0 to 1.0)
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Speech rate (1.0 is normal speed)
    pub fn speech_rate(&self) -> f32 {
        self.speech_rate
    }

    /// Preferred synthesizer voice
    pub fn voice_id(&self) -> Option<&str> {
        self.voice_id.as_deref()
    }

    /// Speak noted pages in segments mode
    pub fn segment_note_fallback(&self) -> bool {
        self.segment_note_fallback
    }

    /// Voice used by default
    pub const DEFAULT_VOICE: &'static str = "en-us-x-iom-local";

    const MIN_SPEECH_RATE: f32 = 0.1;
    const MAX_SPEECH_RATE: f32 = 4.0;
}

impl Default for PagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_defaults() {
        let builder = PagerBuilder::default();
        assert!(builder.enabled());
        assert_eq!(OutputMode::Speech, builder.output_mode());
        assert_approx_eq!(1.0f32, builder.volume());
        assert_approx_eq!(1.15f32, builder.speech_rate());
        assert_eq!(Some("en-us-x-iom-local"), builder.voice_id());
        assert!(!builder.segment_note_fallback());
    }

    #[test]
    fn test_clamping() {
        let mut builder = PagerBuilder::new();
        builder
            .with_volume(1.5)
            .with_speech_rate(10.0)
            .with_voice(None::<String>);
        assert_approx_eq!(1.0f32, builder.volume());
        assert_approx_eq!(4.0f32, builder.speech_rate());
        assert_eq!(None, builder.voice_id());

        builder.with_volume(-0.5).with_speech_rate(0.0);
        assert_approx_eq!(0.0f32, builder.volume());
        assert_approx_eq!(0.1f32, builder.speech_rate());

        builder.with_speech_rate(f32::NAN);
        assert_approx_eq!(1.0f32, builder.speech_rate());
    }
}
