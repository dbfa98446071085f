//! Reads messages and announces them
//!
//! Each input line is one text message:
//!
//! ```txt
//! SENDER<TAB>BODY
//! ```
//!
//! Lines without a TAB are attributed to the `--sender`. Each
//! message is handed to the [`Pager`]. Anything it decides to
//! announce is played on a child process, if one was given, or
//! printed to stdout.

use chrono::Utc;
use log::{error, info, warn};
use pagecode::{Outcome, Pager, PlaybackSession, PlaybackSink, RawMessage};

use crate::cli::Args;
use crate::sink::{ChildSink, ConsoleSink};
use crate::spawner::PageContext;

/// Run the application
///
/// Runs every message line from `input` through the `pager`
/// until the input is exhausted. Blank lines are skipped.
///
/// In demo mode (see `args`), we announce a demo page and exit
/// without reading `input`.
pub fn run<I>(args: &Args, pager: &Pager, input: I)
where
    I: IntoIterator<Item = String>,
{
    if args.demo {
        warn!("demonstration (--demo) mode: the following page is NOT LIVE!");
        announce(args, pager, &make_demo_message());
        return;
    }

    let mut count = 0usize;
    for line in input {
        if line.trim().is_empty() {
            continue;
        }
        announce(args, pager, &parse_line(&line, &args.sender));
        count += 1;
    }
    info!("end of input after {} message(s)", count);
}

/// Split an input line into a message
///
/// The sender is everything before the first TAB. Lines with no
/// TAB, or with an empty sender, use `default_sender`.
pub fn parse_line(line: &str, default_sender: &str) -> RawMessage {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.split_once('\t') {
        Some((sender, body)) if !sender.trim().is_empty() => RawMessage::new(sender.trim(), body),
        Some((_, body)) => RawMessage::new(default_sender, body),
        None => RawMessage::new(default_sender, line),
    }
}

// handle one message and play whatever it produces
//
// Input lines are neither SMS nor notifications, so they go
// straight to the pager.
fn announce(args: &Args, pager: &Pager, msg: &RawMessage) -> Outcome {
    let outcome = pager.handle(msg);
    let request = match outcome.request() {
        Some(request) => request.clone(),
        None => return outcome,
    };

    if !args.quiet {
        match &outcome {
            Outcome::Announce { alert, .. } => eprintln!("page from {}: {}", msg.sender, alert),
            Outcome::Rejected { error, .. } => {
                eprintln!("bad page from {}: {}", msg.sender, error)
            }
            _ => {}
        }
    }

    let result = if args.child.is_empty() {
        let mut sink = ConsoleSink::new(args.quiet);
        play(&mut sink, &request)
    } else {
        let context = PageContext {
            message: msg,
            received: Utc::now(),
            is_fallback: outcome.is_fallback(),
        };
        let mut sink = ChildSink::new(&args.child, context);
        play(&mut sink, &request)
    };

    if let Err(err) = result {
        error!("unable to announce page: {}", err);
    }
    outcome
}

fn play<S>(sink: &mut S, request: &pagecode::PlaybackRequest) -> Result<(), pagecode::PlaybackError>
where
    S: PlaybackSink,
{
    let mut session = PlaybackSession::open(sink)?;
    session.play(request)
}

// a page with every kind of token in it
fn make_demo_message() -> RawMessage {
    RawMessage::new(
        "pitpager demo",
        "pf-e-ind-e-1-dt-m-2-int-p-3-This is only a demo",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;
    use pagecode::{decode, LocationCode, PagerBuilder, PlaybackRequest};

    #[test]
    fn test_parse_line() {
        assert_eq!(
            RawMessage::new("Drive Coach", "pf-e-ind-e-1"),
            parse_line("Drive Coach\tpf-e-ind-e-1\n", "Unknown")
        );
        assert_eq!(
            RawMessage::new("Unknown", "pf-e-ind-e-1"),
            parse_line("pf-e-ind-e-1\r\n", "Unknown")
        );
        assert_eq!(
            RawMessage::new("Unknown", "p-s-dt-m-2"),
            parse_line(" \tp-s-dt-m-2", "Unknown")
        );

        // only the first TAB separates
        assert_eq!(
            RawMessage::new("Bob", "hi\tthere"),
            parse_line("Bob\thi\tthere", "Unknown")
        );
    }

    #[test]
    fn test_announce_lines() {
        let args = Args::try_parse_from(["pitpager", "--quiet"]).expect("bad args");
        let pager = PagerBuilder::new().build();

        let page = parse_line("Drive Coach\tpf-e-ind-e-1", &args.sender);
        match announce(&args, &pager, &page) {
            Outcome::Announce {
                request: PlaybackRequest::Speech(speech),
                ..
            } => assert!(speech.text.ends_with("issue with the indexer.")),
            other => panic!("unexpected {:?}", other),
        }

        let chat = parse_line("see you at lunch", &args.sender);
        assert_eq!(pager.handle(&chat), announce(&args, &pager, &chat));

        let typo = parse_line("pf-e-ind-e-9", &args.sender);
        assert!(announce(&args, &pager, &typo).is_fallback());
    }

    #[test]
    fn test_demo_message() {
        let demo = make_demo_message();
        let alert = decode(&demo.body).expect("demo message must decode");
        assert_eq!(LocationCode::PracticeField, alert.location());
        assert_eq!(3, alert.issues().len());
        assert_eq!(Some("This is only a demo"), alert.trailing_note());
    }
}
