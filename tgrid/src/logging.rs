use std::{
    io::{self, Write as _},
    sync::{OnceLock, PoisonError, RwLock},
};

use crossterm::style::{Color, Stylize as _};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn, true))
}

pub fn init(level: LevelFilter, color: bool) -> Result<(), SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(level);
    logger.set_color(color);

    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Writes records to stderr, so they don't mix with the maze on stdout.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
    color: RwLock<bool>,
}

impl AppLogger {
    fn new(min_level: LevelFilter, color: bool) -> Self {
        Self {
            min_level: RwLock::new(min_level),
            color: RwLock::new(color),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn color(&self) -> bool {
        *self.color.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_color(&self, color: bool) {
        *self.color.write().unwrap_or_else(PoisonError::into_inner) = color;
    }
}

pub fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::White,
        Level::Debug => Color::Blue,
        Level::Trace => Color::Grey,
    }
}

pub fn format_message(level: Level, source: &str, message: &str, color: bool) -> String {
    let indicator = format!("{:<5}", level);
    if color {
        format!(
            "{} {} -> {}",
            indicator.with(level_color(level)),
            source.dim(),
            message
        )
    } else {
        format!("{} {} -> {}", indicator, source, message)
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format_message(
                record.level(),
                record.module_path().unwrap_or("unknown"),
                &record.args().to_string(),
                self.color(),
            );
            let _ = writeln!(io::stderr().lock(), "{}", line);
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
