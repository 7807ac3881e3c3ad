use std::sync::Arc;

use chanlog_core::{CHANLOG_CONFIG, GlobalThreshold, Result, Severity};

use crate::{backend::MakeBackend, logger::Logger, registry::Registry};

/// Registry of channels plus the global threshold they are all gated by.
///
/// Built with [`context_config`] and shared through an `Arc`. Independent
/// contexts do not see each other's channels or thresholds.
pub struct LoggingContext {
    registry: Registry,
    threshold: Arc<GlobalThreshold>,
    initial_level: Severity,
    channel_level: Severity,
}

impl LoggingContext {
    /// Whether the global threshold admits `level`.
    #[inline]
    pub fn can_log(&self, level: Severity) -> bool {
        self.threshold.can_log(level)
    }

    pub fn global_level(&self) -> Severity {
        self.threshold.level()
    }

    /// Ignored once the global level is frozen.
    pub fn set_global_level(&self, level: Severity) {
        self.threshold.set(level);
    }

    /// Ignored when `level` is outside `0..=8` or the global level is frozen.
    pub fn set_global_level_raw(&self, level: i32) {
        self.threshold.set_raw(level);
    }

    /// Locks the global level until [`LoggingContext::deinit`].
    pub fn freeze_global_level(&self) {
        self.threshold.freeze();
    }

    pub fn is_frozen(&self) -> bool {
        self.threshold.is_frozen()
    }

    /// Level given to channels created by a lookup.
    pub fn default_channel_level(&self) -> Severity {
        self.channel_level
    }

    /// Handle on `channel`, creating the channel and its backend with
    /// [`MakeBackend`] on first use.
    ///
    /// # Panics
    /// When the channel is already bound to a backend of another type.
    pub fn get_logger<B>(&self, channel: &str) -> Logger<B>
    where
        B: MakeBackend + Send + Sync + 'static,
    {
        self.get_logger_with(channel, B::make_backend)
    }

    pub fn try_get_logger<B>(&self, channel: &str) -> Result<Logger<B>>
    where
        B: MakeBackend + Send + Sync + 'static,
    {
        self.try_get_logger_with(channel, B::make_backend)
    }

    /// Like [`LoggingContext::get_logger`] with an explicit factory, called
    /// with the channel name only if no backend is bound yet.
    ///
    /// The factory runs outside the registry lock and may use this context,
    /// e.g. to log through a parent channel. When two threads race on an
    /// unbound channel both factories may run; the first backend bound is
    /// kept.
    ///
    /// # Panics
    /// When the channel is already bound to a backend of another type.
    pub fn get_logger_with<B, F>(&self, channel: &str, factory: F) -> Logger<B>
    where
        B: Send + Sync + 'static,
        F: FnOnce(&str) -> B,
    {
        self.try_get_logger_with(channel, factory)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_get_logger_with<B, F>(&self, channel: &str, factory: F) -> Result<Logger<B>>
    where
        B: Send + Sync + 'static,
        F: FnOnce(&str) -> B,
    {
        let (state, backend) = self
            .registry
            .get_or_create(channel, self.channel_level, factory)?;
        Ok(Logger::new(state, backend, Arc::clone(&self.threshold)))
    }

    /// Sets the level of `channel`. An unknown channel is registered with
    /// this level and no backend; the first typed lookup binds one later.
    pub fn set_channel_level(&self, channel: &str, level: Severity) {
        self.registry.set_level(channel, level);
    }

    /// Ignored when `level` is outside `0..=8`.
    pub fn set_channel_level_raw(&self, channel: &str, level: i32) {
        match Severity::try_from(level) {
            Ok(level) => self.registry.set_level(channel, level),
            Err(err) => log::debug!(target: "chanlog", "ignoring level of {channel}: {err}"),
        }
    }

    pub fn channel_level(&self, channel: &str) -> Option<Severity> {
        self.registry.level(channel)
    }

    /// Registered channel names, sorted.
    pub fn channels(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every channel and its backend. Existing handles keep working
    /// but are no longer reachable by name.
    pub fn clear(&self) {
        self.registry.clear();
    }

    /// Teardown: clears channels and restores the global level the context
    /// was built with, lifting any freeze.
    pub fn deinit(&self) {
        self.registry.clear();
        self.threshold.reset(self.initial_level);
    }
}

/// Builder for a [`LoggingContext`].
pub struct ContextBuilder {
    global_level: Severity,
    channel_level: Severity,
    freeze: bool,
    init_fn: Option<Box<dyn FnOnce()>>,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            global_level: Severity::Warning,
            channel_level: Severity::Debug,
            freeze: false,
            init_fn: None,
        }
    }
}

impl ContextBuilder {
    /// Initial global level. Defaults to `Warning`.
    pub fn with_global_level(self, level: Severity) -> Self {
        Self {
            global_level: level,
            ..self
        }
    }
    /// Level of channels created by a lookup. Defaults to `Debug`.
    pub fn with_channel_level(self, level: Severity) -> Self {
        Self {
            channel_level: level,
            ..self
        }
    }
    /// Freeze the global level right after the context is built.
    pub fn freeze_global_level(self) -> Self {
        Self {
            freeze: true,
            ..self
        }
    }
    /// Runs once in [`ContextBuilder::build`], e.g. to install a `log`
    /// implementation used by [`LogCrateBackend`](crate::LogCrateBackend).
    pub fn with_init<F: FnOnce() + 'static>(self, init_fn: F) -> Self {
        Self {
            init_fn: Some(Box::new(init_fn)),
            ..self
        }
    }
    /// Takes levels and the freeze flag from the `CHANLOG_*` environment.
    pub fn from_env(self) -> Self {
        Self {
            global_level: CHANLOG_CONFIG.global_level(),
            channel_level: CHANLOG_CONFIG.channel_level(),
            freeze: CHANLOG_CONFIG.FREEZE,
            ..self
        }
    }
    pub fn build(self) -> Arc<LoggingContext> {
        let Self {
            global_level,
            channel_level,
            freeze,
            init_fn,
        } = self;
        if let Some(init_fn) = init_fn {
            init_fn();
        }
        let threshold = GlobalThreshold::new(global_level);
        if freeze {
            threshold.freeze();
        }
        log::debug!(
            target: "chanlog",
            "logging context ready, global level {global_level}, channel level {channel_level}"
        );
        Arc::new(LoggingContext {
            registry: Registry::default(),
            threshold: Arc::new(threshold),
            initial_level: global_level,
            channel_level,
        })
    }
}

/// Returns a default [`ContextBuilder`].
pub fn context_config() -> ContextBuilder {
    ContextBuilder::default()
}
