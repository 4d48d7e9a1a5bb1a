//! Stderr logger for the CLI.
//!
//! The library only talks to the `log` facade; this is the one place a logger gets
//! installed. Level tags are coloured with `termcolor` when the colour choice allows it.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

struct StderrLogger {
    level: LevelFilter,
    color: ColorChoice,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = StandardStream::stderr(self.color);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(level_color(record.level()))).set_bold(true));
        let _ = write!(stderr, "[{:<5}]", record.level());
        let _ = stderr.reset();
        let _ = writeln!(stderr, " {}: {}", record.target(), record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Green,
        Level::Debug => Color::Cyan,
        Level::Trace => Color::Magenta,
    }
}

/// Installs the stderr logger. Fails if another logger is already set.
pub fn init(level: LevelFilter, color: ColorChoice) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger { level, color }))?;
    log::set_max_level(level);
    Ok(())
}
