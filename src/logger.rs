//! Minimal [`log`] backend writing to stderr

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        // nothing useful to do if stderr is gone
        let _ = std::io::stderr().flush();
    }
}

/// The level to log at: `-v` flags win over the configured level.
///
/// | flags | level |
/// |---|---|
/// | none | `configured`, else [`Warn`](LevelFilter::Warn) |
/// | `-v` | [`Info`](LevelFilter::Info) |
/// | `-vv` | [`Debug`](LevelFilter::Debug) |
/// | `-vvv`... | [`Trace`](LevelFilter::Trace) |
pub fn level(verbosity: u8, configured: Option<LevelFilter>) -> LevelFilter {
    match verbosity {
        0 => configured.unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger.
///
/// # Errors
///
/// If a logger was already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
