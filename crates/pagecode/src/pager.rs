//! Message → announcement pipeline

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info, warn};

use crate::alert::{Alert, DecodeError};
use crate::announcement::{Announcement, AnnouncementPlan, OutputMode};
use crate::builder::PagerBuilder;
use crate::inbound::{InboundSource, RawMessage};
use crate::logutil::escape_log;
use crate::playback::{
    AudioSegmentPlaylist, PlaybackError, PlaybackRequest, PlaybackSession, PlaybackSink,
    SpeechRequest,
};

/// Turns text messages into announcements
///
/// Create a `Pager` with a [`PagerBuilder`]. The pager decodes
/// each [`RawMessage`], renders an announcement according to its
/// configuration, and can play it on a [`PlaybackSink`].
///
/// ```
/// use pagecode::{Outcome, PagerBuilder, PlaybackRequest, RawMessage};
///
/// let pager = PagerBuilder::new().build();
///
/// let page = RawMessage::new("Drive Coach", "pf-e-ind-e-1");
/// match pager.handle(&page) {
///     Outcome::Announce { request: PlaybackRequest::Speech(speech), .. } => {
///         assert!(speech.text.ends_with("issue with the indexer."));
///     }
///     _ => unreachable!(),
/// }
///
/// // ordinary conversation is ignored
/// let chat = RawMessage::new("Drive Coach", "lunch?");
/// assert!(matches!(pager.handle(&chat), Outcome::Ignored(_)));
///
/// // typos are announced as such
/// let typo = RawMessage::new("Drive Coach", "pf-e-ind-e-9");
/// assert!(matches!(pager.handle(&typo), Outcome::Rejected { .. }));
/// ```
///
/// A `Pager` holds no per-message state and may be shared
/// between threads.
#[derive(Debug)]
pub struct Pager {
    enabled: AtomicBool,
    output_mode: OutputMode,
    volume: f32,
    speech_rate: f32,
    voice_id: Option<String>,
    segment_note_fallback: bool,
}

/// What a [`Pager`] decided to do with a message
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Paging is disabled
    Disabled,

    /// Not a paging code; nothing to announce
    Ignored(DecodeError),

    /// A valid page
    Announce {
        /// The decoded page
        alert: Alert,

        /// What to play
        request: PlaybackRequest,
    },

    /// A paging code with an error in it
    ///
    /// The `fallback` announces that the page was malformed.
    Rejected {
        /// Why the code was rejected
        error: DecodeError,

        /// What to play
        fallback: PlaybackRequest,
    },
}

impl Pager {
    /// Decode and render a message
    ///
    /// This method has no side-effects other than logging.
    pub fn handle(&self, msg: &RawMessage) -> Outcome {
        if !self.is_enabled() {
            debug!("paging disabled: ignoring message from {}", msg.sender);
            return Outcome::Disabled;
        }

        debug!("message from {}", msg);
        match Alert::decode(&msg.body) {
            Ok(alert) => {
                let request = self.request_for(&Announcement::from(&alert));
                info!("page from {}: {}", msg.sender, alert);
                Outcome::Announce { alert, request }
            }
            Err(error) if error.is_silent() => {
                debug!("not a paging code: \"{}\"", escape_log(&msg.body));
                Outcome::Ignored(error)
            }
            Err(error) => {
                warn!(
                    "received message with invalid format: \"{}\": {}",
                    escape_log(&msg.body),
                    error
                );
                let fallback = self.request_for(&Announcement::invalid_format());
                Outcome::Rejected { error, fallback }
            }
        }
    }

    /// Decode and render a message from a known source
    ///
    /// Both sources are handled identically.
    pub fn handle_from(&self, source: InboundSource, msg: &RawMessage) -> Outcome {
        debug!("{} received", source);
        self.handle(msg)
    }

    /// Decode, render, and play a message
    ///
    /// If there is anything to announce, the `sink` is opened,
    /// the announcement is played, and the sink is closed again.
    /// Messages which produce no announcement never touch the
    /// sink.
    pub fn dispatch<S>(&self, msg: &RawMessage, sink: &mut S) -> Result<Outcome, PlaybackError>
    where
        S: PlaybackSink + ?Sized,
    {
        let outcome = self.handle(msg);
        if let Some(request) = outcome.request() {
            let mut session = PlaybackSession::open(sink)?;
            if let Err(err) = session.play(request) {
                error!("unable to play announcement: {}", err);
                return Err(err);
            }
        }
        Ok(outcome)
    }

    /// True if paging is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable paging
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        info!("paging {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Configured output mode
    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    // Render an announcement with our playback parameters
    //
    // In segments mode, notes are either dropped or force the
    // whole announcement into speech.
    fn request_for(&self, announcement: &Announcement) -> PlaybackRequest {
        match announcement.render(self.output_mode) {
            AnnouncementPlan::Speech(text) => PlaybackRequest::Speech(self.speech(text)),
            AnnouncementPlan::Segments {
                dropped_note: Some(_),
                ..
            } if self.segment_note_fallback => {
                debug!("note has no audio segment: announcing as speech");
                PlaybackRequest::Speech(self.speech(announcement.speech_text()))
            }
            AnnouncementPlan::Segments {
                segments,
                dropped_note,
            } => {
                if let Some(note) = dropped_note {
                    warn!(
                        "note \"{}\" has no audio segment and will not be announced",
                        escape_log(&note)
                    );
                }
                PlaybackRequest::Segments(AudioSegmentPlaylist::new(segments, self.volume))
            }
        }
    }

    fn speech(&self, text: String) -> SpeechRequest {
        SpeechRequest {
            text,
            volume: self.volume,
            speech_rate: self.speech_rate,
            voice_id: self.voice_id.clone(),
        }
    }
}

impl Outcome {
    /// What to play, if anything
    pub fn request(&self) -> Option<&PlaybackRequest> {
        match self {
            Outcome::Announce { request, .. } => Some(request),
            Outcome::Rejected { fallback, .. } => Some(fallback),
            Outcome::Disabled | Outcome::Ignored(_) => None,
        }
    }

    /// True if this outcome announces the invalid-format message
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Rejected { .. })
    }
}

impl From<&PagerBuilder> for Pager {
    fn from(cfg: &PagerBuilder) -> Self {
        Self {
            enabled: AtomicBool::new(cfg.enabled()),
            output_mode: cfg.output_mode(),
            volume: cfg.volume(),
            speech_rate: cfg.speech_rate(),
            voice_id: cfg.voice_id().map(str::to_owned),
            segment_note_fallback: cfg.segment_note_fallback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    use crate::playback::tests::RecordingSink;

    const FIRST_EXAMPLE_SPEECH: &str = "Attention Pack of Parts pit crew! Please report to the \
        practice field as there is a emergency with the robot. There is a Severity 1 \
        electrical issue with the indexer.";

    fn msg(body: &str) -> RawMessage {
        RawMessage::new("Drive Coach", body)
    }

    #[test]
    fn test_speech_request() {
        let pager = PagerBuilder::new().build();
        let outcome = pager.handle(&msg("pf-e-ind-e-1"));

        let speech = match outcome.request() {
            Some(PlaybackRequest::Speech(speech)) => speech,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(FIRST_EXAMPLE_SPEECH, speech.text);
        assert_approx_eq!(1.0f32, speech.volume);
        assert_approx_eq!(1.15f32, speech.speech_rate);
        assert_eq!(Some("en-us-x-iom-local"), speech.voice_id.as_deref());
        assert!(!outcome.is_fallback());
    }

    #[test]
    fn test_ignored_and_rejected() {
        let pager = PagerBuilder::new().build();

        assert_eq!(
            Outcome::Ignored(DecodeError::TooFewTokens),
            pager.handle(&msg("hello"))
        );

        let outcome = pager.handle(&msg("xx-e-ind-e-1"));
        match &outcome {
            Outcome::Rejected {
                error,
                fallback: PlaybackRequest::Speech(speech),
            } => {
                assert_eq!(&DecodeError::UnknownLocation("xx".to_owned()), error);
                assert_eq!("Read with bad format", speech.text);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_segments_mode() {
        let pager = PagerBuilder::new()
            .with_output_mode(OutputMode::Segments)
            .with_volume(0.5)
            .build();

        match pager.handle(&msg("p-m-hand-m-2")).request() {
            Some(PlaybackRequest::Segments(playlist)) => {
                assert_eq!(10, playlist.segments().len());
                assert_eq!(Some(&"subsystem_handoff"), playlist.segments().last());
                assert_approx_eq!(0.5f32, playlist.volume());
            }
            other => panic!("unexpected {:?}", other),
        }

        // notes are dropped by default
        match pager.handle(&msg("p-m-hand-m-2-hurry")).request() {
            Some(PlaybackRequest::Segments(playlist)) => {
                assert_eq!(10, playlist.segments().len());
            }
            other => panic!("unexpected {:?}", other),
        }

        match pager.handle(&msg("p-m-hand-m")).request() {
            Some(PlaybackRequest::Segments(playlist)) => {
                assert_eq!(&["invalid_format"], playlist.segments());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_segments_note_fallback() {
        let pager = PagerBuilder::new()
            .with_output_mode(OutputMode::Segments)
            .with_segment_note_fallback(true)
            .build();

        match pager.handle(&msg("p-m-hand-m-2-hurry")).request() {
            Some(PlaybackRequest::Speech(speech)) => {
                assert!(speech.text.ends_with("issue with the handoff. Logan says: hurry"));
            }
            other => panic!("unexpected {:?}", other),
        }

        // without a note, segments are still used
        assert!(matches!(
            pager.handle(&msg("p-m-hand-m-2")).request(),
            Some(PlaybackRequest::Segments(_))
        ));
    }

    #[test]
    fn test_enable_toggle() {
        let pager = PagerBuilder::new().with_enabled(false).build();
        assert!(!pager.is_enabled());
        assert_eq!(Outcome::Disabled, pager.handle(&msg("pf-e-ind-e-1")));

        pager.set_enabled(true);
        assert!(matches!(
            pager.handle_from(InboundSource::Notification, &msg("pf-e-ind-e-1")),
            Outcome::Announce { .. }
        ));
    }

    #[test]
    fn test_dispatch() {
        let pager = PagerBuilder::new().build();
        let mut sink = RecordingSink::default();

        // not a page: the sink is never opened
        pager.dispatch(&msg("hello"), &mut sink).expect("dispatch");
        assert_eq!(0, sink.opened);

        pager
            .dispatch(&msg("pf-e-ind-e-1"), &mut sink)
            .expect("dispatch");
        pager
            .dispatch(&msg("pf-e-ind-e-9"), &mut sink)
            .expect("dispatch");
        assert_eq!(2, sink.opened);
        assert_eq!(2, sink.closed);
        assert!(!sink.is_open);

        let texts: Vec<&str> = sink
            .played
            .iter()
            .map(|req| match req {
                PlaybackRequest::Speech(speech) => speech.text.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(vec![FIRST_EXAMPLE_SPEECH, "Read with bad format"], texts);
    }

    #[test]
    fn test_dispatch_sink_unavailable() {
        let pager = PagerBuilder::new().build();
        let mut sink = RecordingSink {
            fail_open: true,
            ..Default::default()
        };
        assert_eq!(
            Err(PlaybackError::Unavailable("no speaker".to_owned())),
            pager.dispatch(&msg("pf-e-ind-e-1"), &mut sink)
        );
        assert!(sink.played.is_empty());
    }

    #[test]
    fn test_pager_is_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pager>();
    }
}
