//! Spawns child process for an announcement

use std::ffi::OsStr;
use std::io;
use std::process::{Child, Command, Stdio};

use chrono::{DateTime, Utc};
use pagecode::{PlaybackRequest, RawMessage};

/// What the child process is told about the page
#[derive(Clone, Debug)]
pub struct PageContext<'m> {
    /// The message which triggered the announcement
    pub message: &'m RawMessage,

    /// When it was received
    pub received: DateTime<Utc>,

    /// True if this is the invalid-format announcement
    pub is_fallback: bool,
}

/// Spawn a child process to play the given announcement
///
/// The child process will receive information about the
/// announcement via the environment. Higher-level logic should
/// write the announcement text to the child's stdin.
///
/// This method will attempt to start an executable named
/// `cmd` with the given `args`.
pub fn spawn<C, A, B>(
    cmd: C,
    args: A,
    request: &PlaybackRequest,
    context: &PageContext<'_>,
) -> io::Result<Child>
where
    C: AsRef<OsStr>,
    B: AsRef<OsStr>,
    A: IntoIterator<Item = B>,
{
    let (text, segments, rate, voice) = match request {
        PlaybackRequest::Speech(speech) => (
            speech.text.clone(),
            String::new(),
            speech.speech_rate.to_string(),
            speech.voice_id.clone().unwrap_or_default(),
        ),
        PlaybackRequest::Segments(playlist) => (
            transcribe(playlist.segments()),
            playlist.segments().join(" "),
            String::new(),
            String::new(),
        ),
    };

    Command::new(cmd)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .args(args)
        .env(childenv::PITPAGER_MODE, request.kind())
        .env(childenv::PITPAGER_TEXT, text)
        .env(childenv::PITPAGER_SEGMENTS, segments)
        .env(childenv::PITPAGER_VOLUME, request.volume().to_string())
        .env(childenv::PITPAGER_RATE, rate)
        .env(childenv::PITPAGER_VOICE, voice)
        .env(childenv::PITPAGER_SENDER, &context.message.sender)
        .env(childenv::PITPAGER_BODY, &context.message.body)
        .env(
            childenv::PITPAGER_RECEIVED,
            time_to_unix_str(context.received),
        )
        .env(
            childenv::PITPAGER_IS_FALLBACK,
            bool_to_env(context.is_fallback),
        )
        .spawn()
}

/// Words spoken by the announcement
///
/// For speech, this is the text to speak. For segments, it is
/// the words each segment speaks, in order.
pub fn spoken_text(request: &PlaybackRequest) -> String {
    match request {
        PlaybackRequest::Speech(speech) => speech.text.clone(),
        PlaybackRequest::Segments(playlist) => transcribe(playlist.segments()),
    }
}

// segment ids → the words they speak
fn transcribe(segments: &[&str]) -> String {
    segments
        .iter()
        .filter_map(pagecode::segment_phrase)
        .collect::<Vec<_>>()
        .join(" ")
}

mod childenv {
    /// Announcement kind
    ///
    /// Either `speech` or `segments`.
    pub const PITPAGER_MODE: &str = "PITPAGER_MODE";

    /// Announcement text
    ///
    /// For `segments` announcements, this is a transcript of the
    /// segments.
    pub const PITPAGER_TEXT: &str = "PITPAGER_TEXT";

    /// Audio segment identifiers
    ///
    /// Space-delimited, in playback order. Empty for `speech`
    /// announcements.
    ///
    /// ```txt
    /// intro location_pit connective_as_there_is_a class_small
    /// ```
    pub const PITPAGER_SEGMENTS: &str = "PITPAGER_SEGMENTS";

    /// Playback volume, from `0` to `1`
    pub const PITPAGER_VOLUME: &str = "PITPAGER_VOLUME";

    /// Speech rate, where `1` is normal speed
    ///
    /// Empty for `segments` announcements.
    pub const PITPAGER_RATE: &str = "PITPAGER_RATE";

    /// Preferred speech synthesizer voice
    ///
    /// Empty if the synthesizer should choose, or for `segments`
    /// announcements.
    pub const PITPAGER_VOICE: &str = "PITPAGER_VOICE";

    /// Who sent the page
    pub const PITPAGER_SENDER: &str = "PITPAGER_SENDER";

    /// The complete message body, as received
    pub const PITPAGER_BODY: &str = "PITPAGER_BODY";

    /// Receive time (UTC UNIX timestamp, in seconds)
    pub const PITPAGER_RECEIVED: &str = "PITPAGER_RECEIVED";

    /// True if the page was malformed
    ///
    /// This variable is set to `Y` if the message looked like a
    /// paging code but could not be decoded. The announcement
    /// will be the invalid-format message. Otherwise, this
    /// variable is set to the empty string.
    pub const PITPAGER_IS_FALLBACK: &str = "PITPAGER_IS_FALLBACK";
}

// convert DateTime to UTC unix timestamp in seconds, as string
fn time_to_unix_str(tm: DateTime<Utc>) -> String {
    format!("{}", tm.format("%s"))
}

// convert true → "Y", false → ""
//
// this is useful for environment variables since empty values
// are usually treated as false
fn bool_to_env(val: bool) -> &'static str {
    if val {
        "Y"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pagecode::{AudioSegmentPlaylist, SpeechRequest};

    #[test]
    fn test_time_to_unix_str() {
        let dt: DateTime<Utc> = DateTime::parse_from_rfc2822("Wed, 18 Feb 2015 23:16:09 GMT")
            .unwrap()
            .into();
        assert_eq!(time_to_unix_str(dt), "1424301369");
    }

    #[test]
    fn test_bool_to_env() {
        assert_eq!("Y", bool_to_env(true));
        assert_eq!("", bool_to_env(false));
    }

    #[test]
    fn test_spoken_text() {
        let speech = PlaybackRequest::Speech(SpeechRequest::new("Read with bad format"));
        assert_eq!("Read with bad format", spoken_text(&speech));

        let playlist = PlaybackRequest::Segments(AudioSegmentPlaylist::new(
            vec!["intro", "location_pit", "connective_as_there_is_a", "class_small"],
            1.0,
        ));
        assert_eq!(
            "Attention Pack of Parts pit crew! Please report to the pit as there is a small issue",
            spoken_text(&playlist)
        );
    }
}
