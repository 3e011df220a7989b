// src/logger.rs

use colored::Colorize;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let tag = match record.level() {
                Level::Error => "error".red().bold(),
                Level::Warn => "warn".yellow(),
                Level::Info => "info".blue(),
                Level::Debug => "debug".dimmed(),
                Level::Trace => "trace".dimmed(),
            };
            eprintln!("{}: {}", tag, record.args());
        }
    }

    fn flush(&self) {}
}
