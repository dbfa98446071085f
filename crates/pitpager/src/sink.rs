//! Playback sinks: print to stdout or hand off to a child process

use std::io::Write;
use std::process::Child;

use log::{debug, error, warn};
use pagecode::{PlaybackError, PlaybackRequest, PlaybackSink};

use crate::spawner::{self, PageContext};

/// Prints announcements to standard output
#[derive(Debug, Default)]
pub struct ConsoleSink {
    quiet: bool,
    is_open: bool,
}

/// Plays each announcement with a child process
///
/// The child is spawned with the announcement text on its stdin
/// and is awaited before `play()` returns, so only one child
/// runs at a time.
#[derive(Debug)]
pub struct ChildSink<'a> {
    child_args: &'a [String],
    context: PageContext<'a>,
    child: Option<Child>,
    is_open: bool,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            is_open: false,
        }
    }
}

impl PlaybackSink for ConsoleSink {
    fn open(&mut self) -> Result<(), PlaybackError> {
        self.is_open = true;
        Ok(())
    }

    fn play(&mut self, request: &PlaybackRequest) -> Result<(), PlaybackError> {
        if !self.is_open {
            return Err(PlaybackError::NotOpen);
        }
        if self.quiet {
            return Ok(());
        }

        match request {
            PlaybackRequest::Speech(speech) => println!("{}", speech.text),
            PlaybackRequest::Segments(playlist) => {
                for segment in playlist.clone() {
                    println!("segment: {}", segment);
                }
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        self.is_open = false;
    }
}

impl<'a> ChildSink<'a> {
    /// Child process `child_args[0]` with arguments `child_args[1..]`
    pub fn new(child_args: &'a [String], context: PageContext<'a>) -> Self {
        Self {
            child_args,
            context,
            child: None,
            is_open: false,
        }
    }

    // Write the announcement to the child and wait for it to exit
    fn run_child(&mut self, text: &str) -> Result<(), PlaybackError> {
        let child = match self.child.as_mut() {
            Some(child) => child,
            None => return Err(PlaybackError::NotOpen),
        };

        // closing stdin tells the child we are done
        if let Some(mut pipe) = child.stdin.take() {
            if let Err(err) = writeln!(pipe, "{}", text) {
                warn!("unable to write to child process: {}", err);
            }
        } else {
            error!("unable to create pipe to child process");
        }

        let exit = child
            .wait()
            .map_err(|err| PlaybackError::Failed(format!("unable to await child: {}", err)))?;
        self.child = None;

        if exit.success() {
            debug!("child process exited successfully");
            Ok(())
        } else {
            let code = exit.code().unwrap_or(1);
            warn!("child process exited abnormally with status {}", code);
            Err(PlaybackError::Failed(format!(
                "child process exited with status {}",
                code
            )))
        }
    }
}

impl<'a> PlaybackSink for ChildSink<'a> {
    fn open(&mut self) -> Result<(), PlaybackError> {
        if self.child_args.is_empty() {
            return Err(PlaybackError::Unavailable(
                "no child process to spawn".to_owned(),
            ));
        }
        self.is_open = true;
        Ok(())
    }

    fn play(&mut self, request: &PlaybackRequest) -> Result<(), PlaybackError> {
        if !self.is_open {
            return Err(PlaybackError::NotOpen);
        }

        // at most one announcement at a time
        self.stop();

        let child = spawner::spawn(
            &self.child_args[0],
            &self.child_args[1..],
            request,
            &self.context,
        )
        .map_err(|err| PlaybackError::Failed(format!("unable to spawn child process: {}", err)))?;
        debug!("spawned child process PID {}", child.id());
        self.child = Some(child);

        self.run_child(&spawner::spoken_text(request))
    }

    fn close(&mut self) {
        self.stop();
        self.is_open = false;
    }
}

impl<'a> ChildSink<'a> {
    // Kill any child which is still running
    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            warn!("stopping child process PID {}", child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use pagecode::{PlaybackSession, RawMessage, SpeechRequest};

    #[test]
    fn test_console_sink() {
        let mut sink = ConsoleSink::new(true);
        let req = PlaybackRequest::Speech(SpeechRequest::new("hello"));
        assert_eq!(Err(PlaybackError::NotOpen), sink.play(&req));
        {
            let mut session = PlaybackSession::open(&mut sink).expect("open");
            session.play(&req).expect("play");
        }
        assert!(!sink.is_open);
    }

    #[test]
    fn test_child_sink_without_child() {
        let msg = RawMessage::new("Bob", "pf-e-ind-e-1");
        let context = PageContext {
            message: &msg,
            received: Utc::now(),
            is_fallback: false,
        };
        let mut sink = ChildSink::new(&[], context);
        assert!(matches!(
            PlaybackSession::open(&mut sink),
            Err(PlaybackError::Unavailable(_))
        ));
    }
}
