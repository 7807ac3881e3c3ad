//! # chanlog
//! Channel-scoped, leveled logging over whatever backend the application
//! already uses.
//!
//! A [`LoggingContext`] maps channel names to a level and a backend instance.
//! Every message is gated by the global threshold first and the channel level
//! second; nothing is formatted unless both admit it.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! chanlog = "0.2.0"
//! ```
//!
//! ```rust
//! use chanlog::{BufferBackend, Severity, context_config, log_error, log_trace, logf_info};
//!
//! let context = context_config()
//!     .with_global_level(Severity::Info)
//!     .build();
//! let root = context.get_logger_with("Root", |_| BufferBackend::plain());
//!
//! log_error!(root, "error log ", 42);
//! log_trace!(root, "never formatted");
//! logf_info!(root, "{} files copied", 3);
//!
//! assert_eq!(
//!     root.backend().contents(),
//!     "[ERROR] Root: error log 42\n[INFO ] Root: 3 files copied\n"
//! );
//! ```
//!
//! ## Channels
//! Each channel has its own level, independent of the others, while the
//! global level caps all of them.
//!
//! ```rust
//! use chanlog::{BufferBackend, Severity, context_config, logf_error, logf_info};
//!
//! let context = context_config().with_global_level(Severity::Debug).build();
//! let root = context.get_logger_with("Root", |_| BufferBackend::plain());
//! let chan = context.get_logger_with("Channel", |_| BufferBackend::plain());
//! context.set_channel_level("Channel", Severity::Error);
//!
//! logf_info!(root, "info log {}", 42);
//! logf_info!(chan, "info log {}", 42);
//! logf_error!(chan, "error log {}", 42);
//!
//! assert_eq!(root.backend().contents(), "[INFO ] Root: info log 42\n");
//! assert_eq!(chan.backend().contents(), "[ERROR] Channel: error log 42\n");
//! ```
//!
//! ## Backends
//! Any `Send + Sync` type implementing [`StreamBackend`] (pieces, used by the
//! `log_*!` macros) or [`FormatBackend`] (format arguments, used by the
//! `logf_*!` macros) can be bound to a channel. A channel keeps the backend
//! type it was first obtained with; asking for another type is an error.
//!
//! ```rust
//! use chanlog::{LogCrateBackend, Severity, context_config, log_warn};
//!
//! let context = context_config()
//!     .with_init(|| {
//!         // install the application's `log` implementation here
//!     })
//!     .build();
//! let net = context.get_logger::<LogCrateBackend>("net");
//! log_warn!(net, "retrying in ", 5, "s");
//! ```

mod backend;
mod context;
mod logger;
mod registry;

use std::sync::{Arc, LazyLock};

pub use backend::{
    BufferBackend, FileBackend, LogCrateBackend, MakeBackend, StdoutBackend, WriterBackend,
};
pub use chanlog_core::{
    Backend, Error, FormatBackend, FormatLogger, Layout, LogGate, Result, Severity, StreamBackend,
    StreamLogger, TIMESTAMP_LEN, TIMESTAMP_PLACEHOLDER, format_timestamp, timestamp,
};
pub use chanlog_core::{
    log_at, log_crit, log_debug, log_emerg, log_error, log_fatal, log_info, log_notice, log_trace,
    log_warn, logf_at, logf_crit, logf_debug, logf_emerg, logf_error, logf_fatal, logf_info,
    logf_notice, logf_trace, logf_warn,
};
pub use context::{ContextBuilder, LoggingContext, context_config};
pub use logger::Logger;

/// Process-wide context, configured from the `CHANLOG_*` environment.
static GLOBAL_CONTEXT: LazyLock<Arc<LoggingContext>> =
    LazyLock::new(|| context_config().from_env().build());

/// Shared context for applications that want a single registry.
pub fn global() -> Arc<LoggingContext> {
    Arc::clone(&GLOBAL_CONTEXT)
}
