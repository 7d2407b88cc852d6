//! # datepoll
//!
//! Find the days that suit everyone: each person marks the dates they can or
//! cannot make, and the dates with the most overlap are listed first.

#![deny(
    clippy::undocumented_unsafe_blocks,
    clippy::missing_safety_doc,
    reason = "multi-person projects should document dangers"
)]
#![warn(missing_docs)]
#![cfg_attr(
    not(any(test, debug_assertions)),
    deny(
        clippy::missing_panics_doc,
        clippy::panic,
        clippy::unimplemented,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "prefer errors over panicking"
    )
)]
#![cfg_attr(
    not(any(test, debug_assertions)),
    forbid(clippy::todo, reason = "production code should not use `todo`")
)]

use clap::{
    Parser,
    builder::{Styles, styling::AnsiColor},
};
use config::Config;
use miette::{IntoDiagnostic, LabeledSpan, Result, Severity, miette};
use render::Locale;
use session::Session;
use std::{
    fs::File,
    io::{self, BufReader, IsTerminal},
    path::PathBuf,
};

mod config;
mod logger;
mod render;
mod session;

const STYLE: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().bold())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightCyan.on_default().bold())
    .placeholder(AnsiColor::Cyan.on_default());

/// Availability poll: find the dates that suit everyone
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, styles = STYLE)]
pub struct Cli {
    /// Provide path to configuration file [default: ./datepoll.toml]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the calendar year
    #[arg(short, long)]
    year: Option<i32>,

    /// Override the months shown (zero-based, repeatable)
    #[arg(short, long = "month", value_name = "INDEX")]
    months: Vec<u32>,

    /// Override the display language
    #[arg(short, long)]
    locale: Option<Locale>,

    /// Read commands from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Print calculation results as JSON
    #[arg(long)]
    json: bool,

    /// Log more (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let Cli {
        config,
        year,
        months,
        locale,
        script,
        json,
        verbose,
    } = match Cli::try_parse() {
        Ok(x) => Ok(x),
        Err(e) if e.kind() == clap::error::ErrorKind::DisplayHelp => {
            return e.print().map_err(miette::Error::from_err);
        }
        Err(e) if e.kind() == clap::error::ErrorKind::DisplayVersion => {
            return e.print().map_err(miette::Error::from_err);
        }
        Err(e) => Err(miette::Error::from_err(e)),
    }?;

    // flags only until the configured level is known
    logger::init(logger::level(verbose, None)).into_diagnostic()?;

    let mut config = Config::load(config.as_deref())?;
    config.apply_overrides(year, months, locale);
    log::set_max_level(logger::level(verbose, config.log_level));
    log::debug!("{config:?}");

    let calendar = config.calendar()?;
    let mut session = Session::new(calendar, config.locale, json);
    let mut stdout = io::stdout().lock();

    match script {
        Some(path) => {
            let file = File::open(&path).map_err(|e| {
                let source = path.display().to_string();
                miette!(
                    severity = Severity::Error,
                    labels = vec![LabeledSpan::at(0..source.len(), e.to_string())],
                    help = "make sure the file exists and can be read",
                    "could not open command script"
                )
                .with_source_code(source)
            })?;
            log::info!("running commands from {}", path.display());
            session
                .run(BufReader::new(file), &mut stdout, false)
                .into_diagnostic()?;
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            session
                .run(stdin.lock(), &mut stdout, interactive)
                .into_diagnostic()?;
        }
    }

    log::info!("session ended with {} participant(s)", session.directory().len());
    Ok(())
}
