//! Severity levels and log records

use std::fmt;

use chrono::{DateTime, Local};

/// Severity of a record, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Numeric severity (`DEBUG` is 10, `CRITICAL` is 50)
    pub fn as_number(&self) -> u8 {
        match self {
            LogLevel::Trace => 5,
            LogLevel::Debug => 10,
            LogLevel::Info => 20,
            LogLevel::Warning => 30,
            LogLevel::Error => 40,
            LogLevel::Critical => 50,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warning,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

/// A single event handed to handlers
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Time the record was created
    pub created: DateTime<Local>,
    /// Name of the logger that produced the record
    pub name: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogRecord {
    /// Create a new record stamped with the current local time
    pub fn new(name: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            created: Local::now(),
            name: name.into(),
            level,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::Debug.as_str(), "DEBUG");
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
        assert_eq!(LogLevel::Critical.as_number(), 50);
    }

    #[test]
    fn test_from_tracing_level() {
        assert_eq!(LogLevel::from(tracing::Level::WARN), LogLevel::Warning);
        assert_eq!(LogLevel::from(tracing::Level::DEBUG), LogLevel::Debug);
    }
}
