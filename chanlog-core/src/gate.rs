//! Capability traits between call sites, handles and backends.

use std::fmt;

use crate::{severity::Severity, timestamp::timestamp};

/// How the line prefix is laid out for a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub timestamp: bool,
    pub color: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            timestamp: true,
            color: false,
        }
    }
}

impl Layout {
    /// No timestamp, no color: `[ERROR] Root: message`.
    pub const PLAIN: Layout = Layout {
        timestamp: false,
        color: false,
    };
}

/// Common part of every backend.
pub trait Backend: Send + Sync + 'static {
    fn layout(&self) -> Layout {
        Layout::default()
    }
}

/// Backend receiving a sequence of already formatted pieces that make up one
/// line, without a terminator.
pub trait StreamBackend: Backend {
    fn append(&self, level: Severity, pieces: &[&dyn fmt::Display]);
}

/// Backend receiving one line as format arguments, without a terminator.
pub trait FormatBackend: Backend {
    fn write_args(&self, level: Severity, args: fmt::Arguments<'_>);
}

/// The gate evaluated by the dispatch macros before anything is formatted.
///
/// Implementations must check the global threshold first and only then the
/// channel level.
pub trait LogGate {
    fn can_log(&self, level: Severity) -> bool;
    fn channel(&self) -> &str;
    fn layout(&self) -> Layout;
}

pub trait StreamLogger: LogGate {
    fn append(&self, level: Severity, pieces: &[&dyn fmt::Display]);
}

pub trait FormatLogger: LogGate {
    fn write_args(&self, level: Severity, args: fmt::Arguments<'_>);
}

/// `<timestamp> <label> <channel>: ` in front of every emitted message.
pub struct Prefix<'a> {
    timestamp: Option<String>,
    level: Severity,
    channel: &'a str,
    color: bool,
}

impl<'a> Prefix<'a> {
    /// Reads the clock when `layout` asks for a timestamp.
    pub fn new(channel: &'a str, layout: Layout, level: Severity) -> Self {
        Self {
            timestamp: layout.timestamp.then(timestamp),
            level,
            channel,
            color: layout.color,
        }
    }
}

impl fmt::Display for Prefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ts) = &self.timestamp {
            write!(f, "{ts} ")?;
        }
        if self.color {
            write!(f, "{} {}: ", self.level.colored_label(), self.channel)
        } else {
            write!(f, "{} {}: ", self.level.label(), self.channel)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::TIMESTAMP_LEN;

    #[test]
    fn test_plain_prefix() {
        let prefix = Prefix::new("Root", Layout::PLAIN, Severity::Error);
        assert_eq!(prefix.to_string(), "[ERROR] Root: ");
    }

    #[test]
    fn test_timestamped_prefix() {
        let prefix = Prefix::new("Channel", Layout::default(), Severity::Warning);
        let line = prefix.to_string();
        assert_eq!(&line[TIMESTAMP_LEN..], " [WARN ] Channel: ");
    }
}
