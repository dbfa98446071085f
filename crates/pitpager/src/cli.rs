use std::fmt::Display;

use clap::{error::ErrorKind, CommandFactory, Parser};
use pagecode::{OutputMode, PagerBuilder, UNKNOWN_SENDER};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
This program reads text messages, one per line, and announces any pit crew paging codes it finds. A line may be prefixed with the sender's name and a TAB.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program reads text messages, one per line, and announces any pit crew paging codes it finds. A line may be prefixed with the sender's name and a TAB.

    printf 'Drive Coach\tpf-e-ind-e-1\n' | pitpager

Messages which are not paging codes are ignored. Paging codes with typos in them are announced as "Read with bad format."

Arguments which follow "--" will be used to spawn a child process for every announcement. You can use this to speak the announcement or to play its audio segments.

    pitpager --file messages.txt -- espeak-ng --stdin

The announcement text is written to the child's standard input. The child process also receives the following environment variables:

  PITPAGER_MODE="speech" (or segments)
  PITPAGER_TEXT="Attention Pack of Parts pit crew! ..."
  PITPAGER_SEGMENTS="intro location_practice_field ..."
  PITPAGER_VOLUME="1" (0.0 to 1.0)
  PITPAGER_RATE="1.15" (1.0 is normal speed)
  PITPAGER_VOICE="en-us-x-iom-local" (or empty)
  PITPAGER_SENDER="Drive Coach"
  PITPAGER_BODY="pf-e-ind-e-1"
  PITPAGER_RECEIVED="1616883240" (UTC UNIX timestamp)
  PITPAGER_IS_FALLBACK="Y" (or empty)

Child processes MUST read or close standard input.
Only one child process runs at a time.
"#;

const PLAYBACK: &str = "Playback Options";

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(author = "Pack of Parts Robotics")]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING, not even announcements
    #[arg(short, long)]
    pub quiet: bool,

    /// Input file (or "-" for stdin)
    ///
    /// One message per line, optionally prefixed by
    /// "SENDER<TAB>".
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Sender for lines without one
    #[arg(long, default_value_t = UNKNOWN_SENDER.to_string())]
    pub sender: String,

    /// Announce a demonstration page and exit
    #[arg(long)]
    pub demo: bool,

    /// Ignore all messages
    ///
    /// Messages are still read, but nothing is announced.
    #[arg(long)]
    pub disabled: bool,

    /// Announce as "speech" or as audio "segments"
    #[arg(long, default_value_t = OutputMode::Speech)]
    #[arg(help_heading = PLAYBACK)]
    pub mode: OutputMode,

    /// Volume (0.0 ≤ VOL ≤ 1.0)
    #[arg(long, default_value_t = 1.0)]
    #[arg(help_heading = PLAYBACK)]
    pub volume: f32,

    /// Speech rate (1.0 is normal speed)
    #[arg(long, default_value_t = 1.15)]
    #[arg(help_heading = PLAYBACK)]
    pub rate: f32,

    /// Speech synthesizer voice (empty for default)
    #[arg(long, default_value_t = PagerBuilder::DEFAULT_VOICE.to_string())]
    #[arg(help_heading = PLAYBACK)]
    pub voice: String,

    /// In segments mode, speak pages that carry a note
    ///
    /// Free-text notes have no audio segment. Without this
    /// option, notes are dropped from the playlist.
    #[arg(long)]
    #[arg(help_heading = PLAYBACK)]
    pub note_fallback_speech: bool,

    /// Spawn child process to play announcements. Optional.
    ///
    /// Arguments are provided VERBATIM to the child process
    /// without shell interpretation.
    #[arg(last = true)]
    pub child: Vec<String>,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }

    /// Pager configuration from these arguments
    pub fn pager_builder(&self) -> PagerBuilder {
        let voice = Some(self.voice.trim()).filter(|v| !v.is_empty());

        let mut builder = PagerBuilder::new();
        builder
            .with_enabled(!self.disabled)
            .with_output_mode(self.mode)
            .with_volume(self.volume)
            .with_speech_rate(self.rate)
            .with_voice(voice)
            .with_segment_note_fallback(self.note_fallback_speech);
        builder
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_clap() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_pager_builder() {
        let args = Args::try_parse_from([
            "pitpager",
            "--mode",
            "segments",
            "--volume",
            "2.0",
            "--voice",
            "",
            "--note-fallback-speech",
            "--",
            "aplay",
        ])
        .expect("bad args");

        assert!(args.input_is_stdin());
        assert_eq!(vec!["aplay".to_owned()], args.child);

        let builder = args.pager_builder();
        assert_eq!(OutputMode::Segments, builder.output_mode());
        assert_approx_eq!(1.0f32, builder.volume());
        assert_approx_eq!(1.15f32, builder.speech_rate());
        assert_eq!(None, builder.voice_id());
        assert!(builder.segment_note_fallback());
        assert!(builder.enabled());
    }

    #[test]
    fn test_bad_mode() {
        assert!(Args::try_parse_from(["pitpager", "--mode", "morse"]).is_err());
    }
}
