use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chanlog_core::{FormatLogger, GlobalThreshold, Layout, LogGate, Result, Severity};

use crate::table::{CapacityPolicy, ChannelTable, LiteChannel};

/// printf-style sink shared by every channel of a [`LiteManager`].
pub type LoggerFn = dyn Fn(Severity, fmt::Arguments<'_>) + Send + Sync;

/// Handle on a channel of a [`LiteManager`]. Lines are always timestamped.
#[derive(Clone)]
pub struct LiteLogger {
    channel: Arc<LiteChannel>,
    sink: Arc<LoggerFn>,
    threshold: Arc<GlobalThreshold>,
}

impl fmt::Debug for LiteLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiteLogger")
            .field("channel", &self.channel.name())
            .field("level", &self.channel.level())
            .finish_non_exhaustive()
    }
}

impl LiteLogger {
    pub fn level(&self) -> Severity {
        self.channel.level()
    }

    pub fn same_channel(&self, other: &LiteLogger) -> bool {
        Arc::ptr_eq(&self.channel, &other.channel)
    }
}

impl LogGate for LiteLogger {
    #[inline]
    fn can_log(&self, level: Severity) -> bool {
        self.threshold.can_log(level) && self.channel.level.can_log(level)
    }

    fn channel(&self) -> &str {
        self.channel.name()
    }

    fn layout(&self) -> Layout {
        Layout::default()
    }
}

impl FormatLogger for LiteLogger {
    fn write_args(&self, level: Severity, args: fmt::Arguments<'_>) {
        (self.sink)(level, args);
    }
}

/// Channel manager over a [`ChannelTable`], with one shared sink.
pub struct LiteManager {
    table: Mutex<ChannelTable>,
    threshold: Arc<GlobalThreshold>,
    sink: Arc<LoggerFn>,
    root: Option<LiteLogger>,
}

impl LiteManager {
    fn table(&self) -> MutexGuard<'_, ChannelTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, channel: Arc<LiteChannel>) -> LiteLogger {
        LiteLogger {
            channel,
            sink: Arc::clone(&self.sink),
            threshold: Arc::clone(&self.threshold),
        }
    }

    /// Handle on `channel`, creating it if needed. `None` when a fixed table
    /// is full.
    pub fn get_logger(&self, channel: &str) -> Option<LiteLogger> {
        self.try_get_logger(channel).ok()
    }

    pub fn try_get_logger(&self, channel: &str) -> Result<LiteLogger> {
        let found = self.table().get_or_insert(channel);
        match found {
            Ok(channel) => Ok(self.handle(channel)),
            Err(err) => {
                log::warn!(target: "chanlog", "channel {channel} not registered: {err}");
                Err(err)
            }
        }
    }

    /// Channel registered at init, if any.
    pub fn root_logger(&self) -> Option<LiteLogger> {
        self.root.clone()
    }

    /// Sets the level of `channel`, registering it when absent. Ignored when
    /// a fixed table has no room left.
    pub fn set_logger_level(&self, channel: &str, level: Severity) {
        let mut table = self.table();
        match table.get(channel) {
            Some(existing) => existing.level.set(level),
            None => {
                if let Err(err) = table.get_or_insert_at(channel, level) {
                    log::warn!(target: "chanlog", "ignoring level of {channel}: {err}");
                }
            }
        }
    }

    /// Ignored when `level` is outside `0..=8`.
    pub fn set_logger_level_raw(&self, channel: &str, level: i32) {
        match Severity::try_from(level) {
            Ok(level) => self.set_logger_level(channel, level),
            Err(err) => log::debug!(target: "chanlog", "ignoring level of {channel}: {err}"),
        }
    }

    pub fn logger_level(&self, channel: &str) -> Option<Severity> {
        self.table().get(channel).map(|channel| channel.level())
    }

    pub fn set_global_level(&self, level: Severity) {
        self.threshold.set(level);
    }

    /// Ignored when `level` is outside `0..=8`.
    pub fn set_global_level_raw(&self, level: i32) {
        self.threshold.set_raw(level);
    }

    pub fn global_level(&self) -> Severity {
        self.threshold.level()
    }

    pub fn can_log(&self, level: Severity) -> bool {
        self.threshold.can_log(level)
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.table().capacity()
    }

    pub fn policy(&self) -> CapacityPolicy {
        self.table().policy()
    }

    /// Releases every channel. Outstanding handles keep their channel alive.
    pub fn deinit(self) {
        log::debug!(target: "chanlog", "releasing {} channels", self.len());
    }
}

/// Builder for a [`LiteManager`].
#[derive(Debug, Clone)]
pub struct LiteBuilder {
    policy: CapacityPolicy,
    global_level: Severity,
    channel_level: Severity,
    root_channel: Option<String>,
}

impl Default for LiteBuilder {
    fn default() -> Self {
        Self {
            policy: CapacityPolicy::default(),
            global_level: Severity::Warning,
            channel_level: Severity::Debug,
            root_channel: None,
        }
    }
}

impl LiteBuilder {
    pub fn with_policy(self, policy: CapacityPolicy) -> Self {
        Self { policy, ..self }
    }
    pub fn with_global_level(self, level: Severity) -> Self {
        Self {
            global_level: level,
            ..self
        }
    }
    /// Level of newly registered channels. Defaults to `Debug`.
    pub fn with_channel_level(self, level: Severity) -> Self {
        Self {
            channel_level: level,
            ..self
        }
    }
    /// Registers `channel` at init and exposes it as the root logger.
    pub fn with_root_channel(self, channel: &str) -> Self {
        Self {
            root_channel: Some(channel.into()),
            ..self
        }
    }
    /// Builds the manager around `sink`. Fails on a zero-sized fixed table or
    /// when the table cannot be allocated.
    pub fn init<F>(self, sink: F) -> Result<LiteManager>
    where
        F: Fn(Severity, fmt::Arguments<'_>) + Send + Sync + 'static,
    {
        let Self {
            policy,
            global_level,
            channel_level,
            root_channel,
        } = self;
        let mut table = ChannelTable::new(policy, channel_level)?;
        let sink: Arc<LoggerFn> = Arc::new(sink);
        let threshold = Arc::new(GlobalThreshold::new(global_level));
        let root = match root_channel {
            Some(name) => Some(LiteLogger {
                channel: table.get_or_insert(&name)?,
                sink: Arc::clone(&sink),
                threshold: Arc::clone(&threshold),
            }),
            None => None,
        };
        log::debug!(
            target: "chanlog",
            "lite manager ready, {policy:?}, global level {global_level}"
        );
        Ok(LiteManager {
            table: Mutex::new(table),
            threshold,
            sink,
            root,
        })
    }
}

/// Returns a default [`LiteBuilder`].
pub fn lite_config() -> LiteBuilder {
    LiteBuilder::default()
}
