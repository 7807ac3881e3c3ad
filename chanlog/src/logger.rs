use std::{fmt, sync::Arc};

use chanlog_core::{
    Backend, FormatBackend, FormatLogger, GlobalThreshold, Layout, LogGate, Severity,
    StreamBackend, StreamLogger,
};

use crate::registry::ChannelState;

/// Handle on a channel and the backend bound to it.
///
/// Cheap to clone. Handles do not own the channel: the
/// [`LoggingContext`](crate::LoggingContext) does, and every handle on the
/// same channel observes the same level.
pub struct Logger<B> {
    state: Arc<ChannelState>,
    backend: Arc<B>,
    threshold: Arc<GlobalThreshold>,
}

impl<B> Clone for Logger<B> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            backend: Arc::clone(&self.backend),
            threshold: Arc::clone(&self.threshold),
        }
    }
}

impl<B> fmt::Debug for Logger<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("channel", &self.state.name)
            .field("level", &self.state.level.get())
            .finish_non_exhaustive()
    }
}

impl<B> Logger<B> {
    pub(crate) fn new(
        state: Arc<ChannelState>,
        backend: Arc<B>,
        threshold: Arc<GlobalThreshold>,
    ) -> Self {
        Self {
            state,
            backend,
            threshold,
        }
    }

    pub fn channel(&self) -> &str {
        &self.state.name
    }

    /// Current level of the channel.
    pub fn level(&self) -> Severity {
        self.state.level.get()
    }

    /// Global threshold first, then the channel level.
    #[inline]
    pub fn can_log(&self, level: Severity) -> bool {
        self.threshold.can_log(level) && self.state.level.can_log(level)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether both handles refer to the same channel entry.
    pub fn same_channel<C>(&self, other: &Logger<C>) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl<B: Backend> LogGate for Logger<B> {
    #[inline]
    fn can_log(&self, level: Severity) -> bool {
        self.threshold.can_log(level) && self.state.level.can_log(level)
    }

    fn channel(&self) -> &str {
        &self.state.name
    }

    fn layout(&self) -> Layout {
        self.backend.layout()
    }
}

impl<B: StreamBackend> StreamLogger for Logger<B> {
    fn append(&self, level: Severity, pieces: &[&dyn fmt::Display]) {
        self.backend.append(level, pieces);
    }
}

impl<B: FormatBackend> FormatLogger for Logger<B> {
    fn write_args(&self, level: Severity, args: fmt::Arguments<'_>) {
        self.backend.write_args(level, args);
    }
}
