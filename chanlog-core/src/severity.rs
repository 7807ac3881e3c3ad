use std::{fmt, str::FromStr};

use colored::{ColoredString, Colorize};

use crate::error::Error;

/// Nine ordered severity levels, from the most severe (`Emerg`, 0) to the
/// most verbose (`Trace`, 8).
///
/// A message at level `L` passes a threshold `T` when `T >= L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    /// The system is unusable.
    Emerg = 0,
    /// Actions that must be taken care of immediately.
    Fatal = 1,
    /// Critical conditions.
    Crit = 2,
    /// Non-critical error conditions.
    Error = 3,
    /// Warning conditions that should be taken care of.
    Warning = 4,
    /// Normal, but significant events.
    Notice = 5,
    /// Informational messages that require no action.
    Info = 6,
    /// Debugging messages.
    Debug = 7,
    /// The most detailed level.
    Trace = 8,
}

impl Severity {
    pub const ALL: [Severity; 9] = [
        Severity::Emerg,
        Severity::Fatal,
        Severity::Crit,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Severity::as_u8`]; `None` outside `0..=8`.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Severity::Emerg),
            1 => Some(Severity::Fatal),
            2 => Some(Severity::Crit),
            3 => Some(Severity::Error),
            4 => Some(Severity::Warning),
            5 => Some(Severity::Notice),
            6 => Some(Severity::Info),
            7 => Some(Severity::Debug),
            8 => Some(Severity::Trace),
            _ => None,
        }
    }

    /// Whether a threshold set to `self` admits a message at `level`.
    #[inline]
    pub fn admits(self, level: Severity) -> bool {
        self >= level
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Emerg => "emerg",
            Severity::Fatal => "fatal",
            Severity::Crit => "crit",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Trace => "trace",
        }
    }

    /// Bracketed, fixed-width label used in emitted lines.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Emerg => "[EMERG]",
            Severity::Fatal => "[FATAL]",
            Severity::Crit => "[CRIT ]",
            Severity::Error => "[ERROR]",
            Severity::Warning => "[WARN ]",
            Severity::Notice => "[NOTIC]",
            Severity::Info => "[INFO ]",
            Severity::Debug => "[DEBUG]",
            Severity::Trace => "[TRACE]",
        }
    }

    pub fn colored_label(self) -> ColoredString {
        let label = self.label();
        match self {
            Severity::Emerg | Severity::Fatal | Severity::Crit => label.red().bold(),
            Severity::Error => label.red(),
            Severity::Warning => label.yellow(),
            Severity::Notice => label.cyan(),
            Severity::Info => label.green(),
            Severity::Debug => label.blue(),
            Severity::Trace => label.purple(),
        }
    }

    /// Closest `log` crate level.
    pub const fn to_log_level(self) -> log::Level {
        match self {
            Severity::Emerg | Severity::Fatal | Severity::Crit | Severity::Error => {
                log::Level::Error
            }
            Severity::Warning => log::Level::Warn,
            Severity::Notice | Severity::Info => log::Level::Info,
            Severity::Debug => log::Level::Debug,
            Severity::Trace => log::Level::Trace,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for Severity {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Error> {
        u8::try_from(value)
            .ok()
            .and_then(Severity::from_u8)
            .ok_or(Error::InvalidLevel(value.into()))
    }
}

impl TryFrom<u8> for Severity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Severity::from_u8(value).ok_or(Error::InvalidLevel(value.into()))
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<i32>() {
            return Severity::try_from(value);
        }
        match s.to_ascii_lowercase().as_str() {
            "emerg" | "emergency" => Ok(Severity::Emerg),
            "fatal" => Ok(Severity::Fatal),
            "crit" | "critical" => Ok(Severity::Crit),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            "trace" => Ok(Severity::Trace),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}
