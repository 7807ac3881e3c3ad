//! Backends bundled with chanlog. Applications can bring their own by
//! implementing [`StreamBackend`] and/or [`FormatBackend`].

use std::{
    fmt::{self, Write as _},
    path::Path,
    sync::{Mutex, PoisonError},
};

use chanlog_core::{
    Backend, FormatBackend, Layout, LogFile, LogStdout, LogWriter, Severity, StreamBackend,
};

/// Default factory for a backend type, used by
/// [`LoggingContext::get_logger`](crate::LoggingContext::get_logger).
pub trait MakeBackend: Sized {
    fn make_backend(channel: &str) -> Self;
}

fn concat(pieces: &[&dyn fmt::Display]) -> String {
    let mut line = String::new();
    for piece in pieces {
        let _ = write!(line, "{piece}");
    }
    line
}

/// Keeps every line in memory, each terminated by `\n`.
#[derive(Debug)]
pub struct BufferBackend {
    lines: Mutex<String>,
    layout: Layout,
}

impl Default for BufferBackend {
    fn default() -> Self {
        Self::with_layout(Layout::default())
    }
}

impl BufferBackend {
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            lines: Mutex::new(String::new()),
            layout,
        }
    }

    /// Lines without timestamp: `[ERROR] Root: message`.
    pub fn plain() -> Self {
        Self::with_layout(Layout::PLAIN)
    }

    pub fn contents(&self) -> String {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl MakeBackend for BufferBackend {
    fn make_backend(_: &str) -> Self {
        Self::default()
    }
}

impl Backend for BufferBackend {
    fn layout(&self) -> Layout {
        self.layout
    }
}

impl StreamBackend for BufferBackend {
    fn append(&self, _: Severity, pieces: &[&dyn fmt::Display]) {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        for piece in pieces {
            let _ = write!(lines, "{piece}");
        }
        lines.push('\n');
    }
}

impl FormatBackend for BufferBackend {
    fn write_args(&self, _: Severity, args: fmt::Arguments<'_>) {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = lines.write_fmt(args);
        lines.push('\n');
    }
}

/// Hands complete lines to a [`LogWriter`].
pub struct WriterBackend<W> {
    writer: Mutex<W>,
    layout: Layout,
}

/// Colored lines on stdout.
pub type StdoutBackend = WriterBackend<LogStdout>;
/// Lines appended to a file.
pub type FileBackend = WriterBackend<LogFile>;

impl<W: LogWriter> WriterBackend<W> {
    pub fn new(writer: W, layout: Layout) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout,
        }
    }

    fn write_line(&self, line: &str) {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .regular(line);
    }

    pub fn flush(&self) {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
    }
}

impl WriterBackend<LogStdout> {
    pub fn stdout() -> Self {
        Self::new(
            LogStdout,
            Layout {
                timestamp: true,
                color: true,
            },
        )
    }
}

impl WriterBackend<LogFile> {
    /// Opens `path` for appending, creating it if needed.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        Ok(Self::new(LogFile::new(path)?, Layout::default()))
    }
}

impl MakeBackend for StdoutBackend {
    fn make_backend(_: &str) -> Self {
        Self::stdout()
    }
}

impl<W: LogWriter + Send + 'static> Backend for WriterBackend<W> {
    fn layout(&self) -> Layout {
        self.layout
    }
}

impl<W: LogWriter + Send + 'static> StreamBackend for WriterBackend<W> {
    fn append(&self, _: Severity, pieces: &[&dyn fmt::Display]) {
        self.write_line(&concat(pieces));
    }
}

impl<W: LogWriter + Send + 'static> FormatBackend for WriterBackend<W> {
    fn write_args(&self, _: Severity, args: fmt::Arguments<'_>) {
        self.write_line(&args.to_string());
    }
}

/// Forwards lines to the `log` crate, with the channel name as target.
///
/// Lines carry no timestamp since the installed `log` implementation is
/// expected to add its own.
#[derive(Debug, Clone)]
pub struct LogCrateBackend {
    target: String,
}

impl LogCrateBackend {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl MakeBackend for LogCrateBackend {
    fn make_backend(channel: &str) -> Self {
        Self::new(channel)
    }
}

impl Backend for LogCrateBackend {
    fn layout(&self) -> Layout {
        Layout::PLAIN
    }
}

impl StreamBackend for LogCrateBackend {
    fn append(&self, level: Severity, pieces: &[&dyn fmt::Display]) {
        let line = concat(pieces);
        log::log!(target: self.target.as_str(), level.to_log_level(), "{line}");
    }
}

impl FormatBackend for LogCrateBackend {
    fn write_args(&self, level: Severity, args: fmt::Arguments<'_>) {
        log::log!(target: self.target.as_str(), level.to_log_level(), "{args}");
    }
}
