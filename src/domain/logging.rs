//! Layer-tagged logging behind a process-wide [`Logger`].
//!
//! Sinks are installed once at start-up; until then every call goes to a
//! no-op sink and timestamps come from chrono's UTC clock.

use derive_more::Display;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace,
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer plus the type or feature emitting the line.
#[derive(Debug, Clone, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub metadata: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: &str) -> Self {
        Self::stamped(level, component, message, None)
    }

    pub fn with_metadata(level: LogLevel, component: LogComponent, message: &str, metadata: &str) -> Self {
        Self::stamped(level, component, message, Some(metadata.to_owned()))
    }

    fn stamped(level: LogLevel, component: LogComponent, message: &str, metadata: Option<String>) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.to_owned(),
            metadata,
        }
    }

    /// `[12:00:01.250]  INFO APP:DashboardService | message | metadata`
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "[{}] {} {} | {}",
            get_time_provider().format_timestamp(self.timestamp),
            self.level,
            self.component,
            self.message
        );
        if let Some(metadata) = &self.metadata {
            line.push_str(" | ");
            line.push_str(metadata);
        }
        line
    }
}

pub trait TimeProvider: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Sink for [`LogEntry`] values. Only `log` is required.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn at(&self, level: LogLevel, component: LogComponent, message: &str) {
        self.log(LogEntry::new(level, component, message));
    }

    fn trace(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Trace, component, message);
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Debug, component, message);
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Info, component, message);
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Warn, component, message);
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Error, component, message);
    }

    fn log_with_metadata(&self, level: LogLevel, component: LogComponent, message: &str, metadata: &str) {
        self.log(LogEntry::with_metadata(level, component, message, metadata));
    }
}

type SharedLogger = Box<dyn Logger>;
type SharedClock = Box<dyn TimeProvider>;

static LOGGER: OnceLock<SharedLogger> = OnceLock::new();
static CLOCK: OnceLock<SharedClock> = OnceLock::new();

/// First call wins; later calls are ignored.
pub fn init_logger(logger: SharedLogger) {
    let _ = LOGGER.set(logger);
}

pub fn init_time_provider(time_provider: SharedClock) {
    let _ = CLOCK.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    match LOGGER.get() {
        Some(logger) => logger.as_ref(),
        None => &Silent,
    }
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    match CLOCK.get() {
        Some(clock) => clock.as_ref(),
        None => &UtcClock,
    }
}

struct Silent;

impl Logger for Silent {
    fn log(&self, _entry: LogEntry) {}
}

/// chrono reads `Date.now()` under wasm32.
struct UtcClock;

impl TimeProvider for UtcClock {
    fn current_timestamp(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        chrono::DateTime::from_timestamp_millis(timestamp as i64)
            .map(|dt| dt.format("%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| timestamp.to_string())
    }
}

/// `format!`-style logging through the global logger. `trace`, `debug`
/// and `info` compile away in release builds.
#[macro_export]
macro_rules! log_at {
    ($level:ident, $component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().at(
            $crate::domain::logging::LogLevel::$level,
            $component,
            &format!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        {
            #[cfg(debug_assertions)]
            $crate::log_at!(Trace, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        {
            #[cfg(debug_assertions)]
            $crate::log_at!(Debug, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        {
            #[cfg(debug_assertions)]
            $crate::log_at!(Info, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log_at!(Warn, $($arg)*);
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log_at!(Error, $($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Info.to_string(), " INFO");
    }

    #[test]
    fn component_prefixes_layer() {
        assert_eq!(LogComponent::Domain("Generator").to_string(), "DOM:Generator");
        assert_eq!(LogComponent::Presentation("Api").to_string(), "PRE:Api");
    }

    #[test]
    fn entry_line_includes_metadata() {
        let entry = LogEntry::with_metadata(
            LogLevel::Warn,
            LogComponent::Application("Dashboard"),
            "stale",
            "ticket=3",
        );
        assert!(entry.format_line().ends_with(" WARN APP:Dashboard | stale | ticket=3"));
        let plain = LogEntry::new(LogLevel::Error, LogComponent::Domain("X"), "boom");
        assert!(plain.format_line().ends_with("ERROR DOM:X | boom"));
    }
}
