//! Dispatch macros.
//!
//! Every macro evaluates the gate of the handle first and touches its
//! arguments only when the message will actually be emitted.

/// Stream-style logging: each piece after the level is a `Display` value,
/// concatenated by the backend.
///
/// ```
/// # use chanlog_core::{log_at, Severity, LogGate, StreamLogger, Layout};
/// # struct Silent;
/// # impl LogGate for Silent {
/// #     fn can_log(&self, _: Severity) -> bool { false }
/// #     fn channel(&self) -> &str { "Root" }
/// #     fn layout(&self) -> Layout { Layout::PLAIN }
/// # }
/// # impl StreamLogger for Silent {
/// #     fn append(&self, _: Severity, _: &[&dyn std::fmt::Display]) { unreachable!() }
/// # }
/// # let logger = Silent;
/// log_at!(logger, Severity::Error, "error log ", 42);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr $(, $piece:expr)* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::{LogGate as _, StreamLogger as _};
        let logger = &$logger;
        let level: $crate::Severity = $level;
        if logger.can_log(level) {
            let prefix = $crate::Prefix::new(logger.channel(), logger.layout(), level);
            logger.append(
                level,
                &[&prefix as &dyn ::std::fmt::Display $(, &$piece as &dyn ::std::fmt::Display)*],
            );
        }
    }};
}

/// Format-style logging: a format template plus arguments, handed to the
/// backend as `fmt::Arguments`.
#[macro_export]
macro_rules! logf_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::{FormatLogger as _, LogGate as _};
        let logger = &$logger;
        let level: $crate::Severity = $level;
        if logger.can_log(level) {
            logger.write_args(
                level,
                format_args!(
                    "{}{}",
                    $crate::Prefix::new(logger.channel(), logger.layout(), level),
                    format_args!($($arg)+)
                ),
            );
        }
    }};
}

#[macro_export]
macro_rules! log_emerg {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Emerg $(, $piece)*)
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Fatal $(, $piece)*)
    };
}

#[macro_export]
macro_rules! log_crit {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Crit $(, $piece)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Error $(, $piece)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Warning $(, $piece)*)
    };
}

#[macro_export]
macro_rules! log_notice {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Notice $(, $piece)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Info $(, $piece)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Debug $(, $piece)*)
    };
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr $(, $piece:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Trace $(, $piece)*)
    };
}

#[macro_export]
macro_rules! logf_emerg {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Emerg, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_crit {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Crit, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Notice, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Trace, $($arg)+)
    };
}
