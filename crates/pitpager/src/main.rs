use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use log::{error, info, LevelFilter};

mod app;
mod cli;
mod sink;
mod spawner;

use cli::{Args, CliError};

fn main() {
    match pitpager() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn pitpager() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    // create the pager
    let pager = args.pager_builder().build();

    // file setup: locks stdin in case we need it
    let stdin = io::stdin();
    let stdin_handle = stdin.lock();
    let inbuf = file_setup(&args, stdin_handle)?;

    // processing: one message per line
    app::run(
        &args,
        &pager,
        inbuf.lines().map_while(|line| match line {
            Ok(line) => Some(line),
            Err(err) => {
                error!("unable to read input: {}", err);
                None
            }
        }),
    );

    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("pagecode", log_filter)
            .filter_module("pitpager", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

fn file_setup<'stdin>(
    args: &Args,
    stdin: std::io::StdinLock<'stdin>,
) -> Result<Box<dyn io::BufRead + 'stdin>, anyhow::Error> {
    if args.demo {
        // demo mode reads nothing
        return Ok(Box::new(io::empty()));
    }

    if args.input_is_stdin() {
        if is_terminal(&std::io::stdin()) {
            info!("pitpager reading messages from terminal: type one per line, then ^D");
        } else {
            info!("pitpager reading standard input");
        }
        Ok(Box::new(stdin))
    } else {
        info!("pitpager reading file: \"{}\"", &args.file);
        Ok(Box::new(io::BufReader::new(
            std::fs::File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}

#[cfg(not(target_os = "windows"))]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::fd::AsRawFd,
{
    terminal_size::terminal_size_using_fd(stream.as_raw_fd()).is_some()
}

#[cfg(target_os = "windows")]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::windows::io::AsRawHandle,
{
    terminal_size::terminal_size_using_handle(stream.as_raw_handle()).is_some()
}
