use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::severity::Severity;

/// Process-wide severity ceiling, checked before any channel level.
///
/// Reads and writes are single atomic operations and never contend with a
/// registry lock. Once [`GlobalThreshold::freeze`] is called, setters are
/// ignored until [`GlobalThreshold::reset`].
#[derive(Debug)]
pub struct GlobalThreshold {
    level: AtomicU8,
    frozen: AtomicBool,
}

impl Default for GlobalThreshold {
    fn default() -> Self {
        Self::new(Severity::Warning)
    }
}

impl GlobalThreshold {
    pub fn new(level: Severity) -> Self {
        Self {
            level: AtomicU8::new(level.as_u8()),
            frozen: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn level(&self) -> Severity {
        // only ever written from a valid `Severity`
        Severity::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or(Severity::Trace)
    }

    #[inline]
    pub fn can_log(&self, level: Severity) -> bool {
        self.level.load(Ordering::Relaxed) >= level.as_u8()
    }

    /// Returns `false` when the threshold is frozen and the call had no effect.
    pub fn set(&self, level: Severity) -> bool {
        if self.is_frozen() {
            log::debug!(target: "chanlog", "global level is frozen, ignoring {level}");
            return false;
        }
        self.level.store(level.as_u8(), Ordering::Relaxed);
        true
    }

    /// Sets the level from an untyped value; values outside `0..=8` are ignored.
    pub fn set_raw(&self, level: i32) -> bool {
        match Severity::try_from(level) {
            Ok(level) => self.set(level),
            Err(err) => {
                log::debug!(target: "chanlog", "ignoring global level: {err}");
                false
            }
        }
    }

    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Teardown: restores `level` and lifts the freeze flag.
    pub fn reset(&self, level: Severity) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
        self.frozen.store(false, Ordering::Release);
    }
}

/// Severity cell of a single channel, shared by every handle on that channel.
#[derive(Debug)]
pub struct ChannelLevel(AtomicU8);

impl ChannelLevel {
    pub fn new(level: Severity) -> Self {
        Self(AtomicU8::new(level.as_u8()))
    }

    #[inline]
    pub fn get(&self) -> Severity {
        Severity::from_u8(self.0.load(Ordering::Relaxed)).unwrap_or(Severity::Trace)
    }

    #[inline]
    pub fn set(&self, level: Severity) {
        self.0.store(level.as_u8(), Ordering::Relaxed);
    }

    #[inline]
    pub fn can_log(&self, level: Severity) -> bool {
        self.0.load(Ordering::Relaxed) >= level.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_warning() {
        let threshold = GlobalThreshold::default();
        assert_eq!(threshold.level(), Severity::Warning);
        assert!(threshold.can_log(Severity::Error));
        assert!(threshold.can_log(Severity::Warning));
        assert!(!threshold.can_log(Severity::Notice));
    }

    #[test]
    fn test_set_raw_ignores_out_of_range() {
        let threshold = GlobalThreshold::new(Severity::Info);
        assert!(!threshold.set_raw(9));
        assert!(!threshold.set_raw(-3));
        assert_eq!(threshold.level(), Severity::Info);
        assert!(threshold.set_raw(2));
        assert_eq!(threshold.level(), Severity::Crit);
    }

    #[test]
    fn test_freeze_is_one_way_until_reset() {
        let threshold = GlobalThreshold::new(Severity::Info);
        threshold.freeze();
        assert!(!threshold.set(Severity::Trace));
        assert!(!threshold.set_raw(0));
        assert_eq!(threshold.level(), Severity::Info);
        threshold.freeze();
        assert!(threshold.is_frozen());

        threshold.reset(Severity::Warning);
        assert!(!threshold.is_frozen());
        assert!(threshold.set(Severity::Debug));
        assert_eq!(threshold.level(), Severity::Debug);
    }

    #[test]
    fn test_channel_level() {
        let level = ChannelLevel::new(Severity::Debug);
        assert!(level.can_log(Severity::Debug));
        assert!(!level.can_log(Severity::Trace));
        level.set(Severity::Error);
        assert_eq!(level.get(), Severity::Error);
        assert!(!level.can_log(Severity::Warning));
    }
}
