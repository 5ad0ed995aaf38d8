//! Interactive terminal front end for a remote `/books` collection.
//!
//! Reads one command per line, applies it to a `Session`, and redraws the
//! form and the table. Failures go to the log on stderr and a short banner
//! on stdout.

mod command;
mod config;
mod render;
mod transport;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use book_core::{BookClient, Outcome, Session, Transport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::command::{Command, ParseError, HELP};
use crate::config::Config;
use crate::transport::UreqTransport;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time(),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Config::from_env();
    tracing::info!(api_url = %config.api_url, "starting");

    let (mut session, outcome) =
        Session::mount(BookClient::new(&config.api_url), UreqTransport::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = redraw(&mut out, &session, Some(&outcome)) {
        tracing::error!("failed to write to stdout: {e}");
        return ExitCode::FAILURE;
    }

    match repl(io::stdin().lock(), &mut out, &mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("terminal I/O failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn repl<T: Transport>(
    input: impl BufRead,
    out: &mut impl Write,
    session: &mut Session<T>,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let outcome = match line.parse::<Command>() {
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Help) => {
                writeln!(out, "{HELP}")?;
                prompt(out)?;
                continue;
            }
            Ok(command) => apply(session, command),
            Err(ParseError::Empty) => {
                prompt(out)?;
                continue;
            }
            Err(e) => {
                writeln!(out, "! {e}")?;
                prompt(out)?;
                continue;
            }
        };
        redraw(out, session, outcome.as_ref())?;
    }
    Ok(())
}

/// Local edits have nothing to report; only network actions yield an outcome.
fn apply<T: Transport>(session: &mut Session<T>, command: Command) -> Option<Outcome> {
    match command {
        Command::Mode(mode) => session.set_mode(mode),
        Command::Set(field, value) => session.edit_field(field, value),
        Command::Clear => session.clear_buffer(),
        Command::Submit => return Some(session.submit()),
        Command::Refresh => return Some(session.refresh()),
        Command::Show | Command::Help | Command::Quit => {}
    }
    None
}

fn redraw<T: Transport>(
    out: &mut impl Write,
    session: &Session<T>,
    outcome: Option<&Outcome>,
) -> io::Result<()> {
    let manager = session.manager();
    if let Some(banner) = outcome.and_then(render::outcome) {
        writeln!(out, "{banner}")?;
    }
    writeln!(out)?;
    write!(out, "{}", render::form(manager.mode(), manager.buffer()))?;
    writeln!(out)?;
    write!(out, "{}", render::table(&manager.table()))?;
    prompt(out)
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
