//! # chanlog-core
//! Core utilities for chanlog: the severity scale, thresholds, line layout,
//! backend capability traits and the dispatch macros shared by `chanlog` and
//! `chanlog-lite`.

mod config;
mod error;
mod gate;
mod log_writer;
mod macros;
mod severity;
mod threshold;
mod timestamp;

pub use config::{CHANLOG_CONFIG, ChanlogConfig};
pub use error::{Error, Result};
pub use gate::{
    Backend, FormatBackend, FormatLogger, Layout, LogGate, Prefix, StreamBackend, StreamLogger,
};
pub use log_writer::{LogFile, LogStdout, LogWriter};
pub use severity::Severity;
pub use threshold::{ChannelLevel, GlobalThreshold};
pub use timestamp::{TIMESTAMP_LEN, TIMESTAMP_PLACEHOLDER, format_timestamp, timestamp};
