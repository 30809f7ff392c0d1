//! Logger implementation for the log crate.

use std::fmt::{self, Display};
use std::io::Write;
use std::time::Instant;

use anyhow::Context;
use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};

lazy_static! {
    /// Log timestamps are relative to this instant.
    static ref START: Instant = Instant::now();
}

pub struct SimpleLogger;

static LOGGER: SimpleLogger = SimpleLogger;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Cyan = 36,
    BrightBlack = 90,
    BrightRed = 91,
    BrightGreen = 92,
    BrightYellow = 93,
    BrightCyan = 96,
}

impl Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{1B}[{}m", *self as u8)
    }
}

/// `(level color, message color)` for a record level.
pub fn colors(level: Level) -> (ColorCode, ColorCode) {
    match level {
        Level::Error => (ColorCode::BrightRed, ColorCode::Red),
        Level::Warn => (ColorCode::BrightYellow, ColorCode::Yellow),
        Level::Info => (ColorCode::BrightGreen, ColorCode::Green),
        Level::Debug => (ColorCode::BrightCyan, ColorCode::Cyan),
        Level::Trace => (ColorCode::BrightBlack, ColorCode::BrightBlack),
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let file = record.file().unwrap_or("none");
        let line = record.line().unwrap_or(0);
        let args = record.args();
        let color_reset = "\u{1B}[0m";
        let (level_color, args_color) = colors(record.level());
        let secs = START.elapsed().as_secs_f64();

        // Test progress goes to stdout, so logs stay on stderr.
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{secs:.5} {level_color}{level:<5}{color_reset} {file}:{line}] {args_color}{args}{color_reset}",
            level = record.level(),
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Initialize the logger.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    lazy_static::initialize(&START);
    log::set_logger(&LOGGER).context("logger already initialized")?;
    log::set_max_level(level);
    Ok(())
}
