//! Browser-backed implementations of the domain logging traits.

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};

/// Logger writing to the browser console, one console method per level.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if !self.accepts(entry.level) {
            return;
        }
        let formatted = entry.format_line().into();
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted),
            LogLevel::Info => web_sys::console::info_1(&formatted),
            LogLevel::Warn => web_sys::console::warn_1(&formatted),
            LogLevel::Error => web_sys::console::error_1(&formatted),
        }
    }
}

/// Clock reading `Date.now()`, formatted as `HH:MM:SS.mmm` UTC.
#[derive(Debug, Default)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        chrono::DateTime::from_timestamp_millis(timestamp as i64)
            .map(|dt| dt.format("%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| timestamp.to_string())
    }
}
