//! `log` backend for the browser console.

use crate::error::TooltipError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;
use wasm_bindgen::JsValue;

pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line: JsValue = format_line(record.level(), record.target(), record.args()).into();
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs [`ConsoleLogger`] as the global logger. Fails if one is already set.
pub fn init(level: LevelFilter) -> Result<(), TooltipError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(level)))
        .map_err(|_| TooltipError::LoggerAlreadySet)?;
    log::set_max_level(level);
    Ok(())
}

fn format_line(level: Level, target: &str, args: &fmt::Arguments<'_>) -> String {
    format!("[{level}] {target}: {args}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line(Level::Debug, "invalid_tooltip::observer", &format_args!("shown {}", 1));
        assert_eq!(line, "[DEBUG] invalid_tooltip::observer: shown 1");
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ConsoleLogger::new(LevelFilter::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }
}
