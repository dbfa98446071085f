//! # pagecode: Pit Crew Paging Codes
//!
//! This crate decodes the short *paging codes* which a drive team
//! texts to its pit crew, and turns them into spoken announcements.
//!
//! A paging code looks like
//!
//! ```txt
//! pf-e-ind-e-1
//! ```
//!
//! and is announced as
//!
//! > Attention Pack of Parts pit crew! Please report to the practice
//! > field as there is a emergency with the robot. There is a
//! > Severity 1 electrical issue with the indexer.
//!
//! ## Example
//!
//! Receiving the text message is up to you. So is playing the
//! announcement. This crate sits in between.
//!
//! ```
//! use pagecode::{
//!     PagerBuilder, PlaybackError, PlaybackRequest, PlaybackSink, RawMessage,
//! };
//!
//! // your speech synthesizer or audio player
//! struct Speaker;
//!
//! impl PlaybackSink for Speaker {
//!     fn open(&mut self) -> Result<(), PlaybackError> {
//!         Ok(())
//!     }
//!
//!     fn play(&mut self, request: &PlaybackRequest) -> Result<(), PlaybackError> {
//!         match request {
//!             PlaybackRequest::Speech(speech) => println!("saying: {}", speech.text),
//!             PlaybackRequest::Segments(playlist) => {
//!                 for segment in playlist.segments() {
//!                     println!("playing: {}.ogg", segment);
//!                 }
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn close(&mut self) {}
//! }
//!
//! let pager = PagerBuilder::new()
//!     .with_volume(1.0)
//!     .with_speech_rate(1.15)
//!     .build();
//!
//! let mut speaker = Speaker;
//! let msg = RawMessage::new("Drive Coach", "mf-s-dt-p-3-clmb-a-5-Logan");
//! let outcome = pager.dispatch(&msg, &mut speaker).expect("playback failed");
//! assert!(outcome.request().is_some());
//! ```
//!
//! ## Decoding without announcing
//!
//! The [`decode()`] and [`render()`] functions are available
//! separately. Both are pure functions.
//!
//! ```
//! use pagecode::{decode, render, AnnouncementPlan, DecodeError, IssueField, OutputMode};
//!
//! let alert = decode("pf-e-ind-e-1").expect("bad code");
//! let plan = render(&alert, OutputMode::Speech);
//! assert!(matches!(plan, AnnouncementPlan::Speech(_)));
//!
//! // most messages are not paging codes at all
//! assert_eq!(Err(DecodeError::TooFewTokens), decode("hello"));
//!
//! // paging codes with typos are rejected entirely
//! assert!(matches!(
//!     decode("pf-e-ind-e-9"),
//!     Err(DecodeError::UnknownIssueField { position: 4, field: IssueField::SeverityLevel, .. })
//! ));
//! ```
//!
//! ## Paging code format
//!
//! | Position          | Meaning                    | See                  |
//! |-------------------|----------------------------|----------------------|
//! | 0                 | location                   | [`LocationCode`]     |
//! | 1                 | class                      | [`ClassSeverity`]    |
//! | 2, 5, 8, …        | issue subsystem            | [`Subsystem`]        |
//! | 3, 6, 9, …        | issue sub-team             | [`Subteam`]          |
//! | 4, 7, 10, …       | issue severity level       | [`SeverityLevel`]    |
//! | last, optional    | free-text note             |                      |
//!
//! Tokens are separated by `-`. A single token left over after the
//! last complete issue is a free-text note. Two left-over tokens
//! are an error.

pub mod codes;

mod alert;
mod announcement;
mod builder;
mod inbound;
mod logutil;
mod pager;
mod playback;
mod vocabulary;

pub use alert::{Alert, DecodeError, IssueEntry};
pub use announcement::{
    render, Announcement, AnnouncementPlan, AnnouncementUnit, OutputMode, UnknownOutputMode,
};
pub use builder::PagerBuilder;
pub use codes::{ClassSeverity, Code, IssueField, LocationCode, SeverityLevel, Subsystem, Subteam};
pub use inbound::{
    from_sms, ConversationMessage, InboundSource, Notification, NotificationFilter, RawMessage,
    SmsMessage, DEFAULT_MESSAGING_PACKAGE, UNKNOWN_SENDER,
};
pub use pager::{Outcome, Pager};
pub use playback::{
    AudioSegmentPlaylist, PlaybackError, PlaybackRequest, PlaybackSession, PlaybackSink,
    SpeechRequest,
};
pub use vocabulary::{segment_phrase, Connective};

/// Decode a paging code from a message body
///
/// The body is split on `-` and each token is trimmed and
/// lower-cased before it is looked up. Decoding stops at the
/// first invalid token.
///
/// Returns [`DecodeError::TooFewTokens`] if the body has fewer
/// than three tokens. Such messages are not paging codes and
/// should be ignored silently.
pub fn decode<S>(body: S) -> Result<Alert, DecodeError>
where
    S: AsRef<str>,
{
    Alert::decode(body)
}
