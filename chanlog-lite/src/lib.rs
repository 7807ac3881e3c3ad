//! # chanlog-lite
//! printf-style channel logging over a plain hash table with an explicit
//! capacity policy.
//!
//! Every channel shares one sink function; channels only carry a name and a
//! level. The table either doubles when full ([`CapacityPolicy::Dynamic`]) or
//! refuses new channels ([`CapacityPolicy::Fixed`]).
//!
//! ## Usage
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use chanlog_lite::{CapacityPolicy, Severity, lite_config, logf_error, logf_trace};
//!
//! let output = Arc::new(Mutex::new(String::new()));
//! let sink = Arc::clone(&output);
//! let manager = lite_config()
//!     .with_policy(CapacityPolicy::Fixed(4))
//!     .with_global_level(Severity::Debug)
//!     .with_root_channel("Root")
//!     .init(move |_, args| {
//!         let mut out = sink.lock().unwrap();
//!         out.push_str(&args.to_string());
//!         out.push('\n');
//!     })
//!     .expect("non-zero capacity");
//!
//! let root = manager.root_logger().unwrap();
//! logf_error!(root, "error log, {}", 42);
//! logf_trace!(root, "too verbose");
//!
//! let output = output.lock().unwrap();
//! assert!(output.ends_with(" [ERROR] Root: error log, 42\n"));
//! assert_eq!(output.lines().count(), 1);
//! ```
//!
//! ## Fixed capacity
//! ```rust
//! use chanlog_lite::{CapacityPolicy, Error, lite_config};
//!
//! let manager = lite_config()
//!     .with_policy(CapacityPolicy::Fixed(1))
//!     .init(|_, _| {})
//!     .unwrap();
//! assert!(manager.get_logger("Root").is_some());
//! assert!(manager.get_logger("Channel").is_none());
//! assert_eq!(
//!     manager.try_get_logger("Channel").unwrap_err(),
//!     Error::CapacityExhausted { capacity: 1 }
//! );
//! assert!(lite_config().with_policy(CapacityPolicy::Fixed(0)).init(|_, _| {}).is_err());
//! ```

mod manager;
mod table;

pub use chanlog_core::{
    Error, FormatLogger, LogGate, Result, Severity, TIMESTAMP_LEN, TIMESTAMP_PLACEHOLDER,
    timestamp,
};
pub use chanlog_core::{
    logf_at, logf_crit, logf_debug, logf_emerg, logf_error, logf_fatal, logf_info, logf_notice,
    logf_trace, logf_warn,
};
pub use manager::{LiteBuilder, LiteLogger, LiteManager, LoggerFn, lite_config};
pub use table::{
    CapacityPolicy, ChannelTable, LiteChannel, MAX_CHANNEL_LEN, MIN_DYNAMIC_CAPACITY,
    truncate_channel,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn capture() -> (
        Arc<Mutex<String>>,
        impl Fn(Severity, std::fmt::Arguments<'_>) + Send + Sync + 'static,
    ) {
        let output = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&output);
        (output, move |_: Severity, args: std::fmt::Arguments<'_>| {
            let mut out = sink.lock().unwrap();
            out.push_str(&args.to_string());
            out.push('\n');
        })
    }

    /// `*` in `expected` matches any character.
    fn matches_mask(expected: &str, log: &str) -> bool {
        expected.len() == log.len()
            && expected
                .bytes()
                .zip(log.bytes())
                .all(|(e, l)| e == b'*' || e == l)
    }

    fn init(policy: CapacityPolicy, global: Severity) -> (Arc<Mutex<String>>, LiteManager) {
        let (output, sink) = capture();
        let manager = lite_config()
            .with_policy(policy)
            .with_global_level(global)
            .init(sink)
            .unwrap();
        (output, manager)
    }

    const CHANNELS_EXPECTED: &str = "****-**-** **:**:**.*** [INFO ] Root: info log 42\n\
                                     ****-**-** **:**:**.*** [ERROR] Root: error log 42\n\
                                     ****-**-** **:**:**.*** [ERROR] Channel: error log 42\n\
                                     ****-**-** **:**:**.*** [CRIT ] Root: crit log 42\n\
                                     ****-**-** **:**:**.*** [CRIT ] Channel: crit log 42\n";

    fn log_channels(manager: &LiteManager) {
        let root = manager.get_logger("Root");
        let chan = manager.get_logger("Channel");
        manager.set_global_level(Severity::Debug);

        manager.set_logger_level("Root", Severity::Info);
        manager.set_logger_level("Channel", Severity::Error);
        for logger in [&root, &chan].into_iter().flatten() {
            logf_info!(logger, "info log {}", 42);
        }
        for logger in [&root, &chan].into_iter().flatten() {
            logf_error!(logger, "error log {}", 42);
        }

        manager.set_logger_level("Root", Severity::Crit);
        manager.set_logger_level("Channel", Severity::Crit);
        for logger in [&root, &chan].into_iter().flatten() {
            logf_error!(logger, "error log {}", 42);
        }
        for logger in [&root, &chan].into_iter().flatten() {
            logf_crit!(logger, "crit log {}", 42);
        }
    }

    #[test]
    fn test_logging_fixed() {
        let (output, manager) = init(CapacityPolicy::Fixed(1), Severity::Debug);
        let root = manager.get_logger("Root").unwrap();
        logf_error!(root, "error log, {}", 42);
        assert!(matches_mask(
            "****-**-** **:**:**.*** [ERROR] Root: error log, 42\n",
            &output.lock().unwrap()
        ));
    }

    #[test]
    fn test_logging_dynamic() {
        let (output, manager) = init(CapacityPolicy::Dynamic { initial: 1 }, Severity::Debug);
        let root = manager.get_logger("Root").unwrap();
        logf_error!(root, "error log, {}", 42);
        assert!(matches_mask(
            "****-**-** **:**:**.*** [ERROR] Root: error log, 42\n",
            &output.lock().unwrap()
        ));
        manager.deinit();
    }

    #[test]
    fn test_severity_level() {
        let (output, manager) = init(CapacityPolicy::Fixed(1), Severity::Crit);
        let root = manager.get_logger("Root").unwrap();
        logf_error!(root, "error log {}", 42);
        logf_crit!(root, "crit log {}", 42);
        assert!(matches_mask(
            "****-**-** **:**:**.*** [CRIT ] Root: crit log 42\n",
            &output.lock().unwrap()
        ));

        manager.set_global_level(Severity::Info);
        logf_error!(root, "error log {}", 42);
        assert!(matches_mask(
            "****-**-** **:**:**.*** [CRIT ] Root: crit log 42\n\
             ****-**-** **:**:**.*** [ERROR] Root: error log 42\n",
            &output.lock().unwrap()
        ));
    }

    #[test]
    fn test_channels_fixed() {
        let (output, manager) = init(CapacityPolicy::Fixed(2), Severity::Crit);
        log_channels(&manager);
        assert!(matches_mask(CHANNELS_EXPECTED, &output.lock().unwrap()));
    }

    #[test]
    fn test_channels_dynamic() {
        let (output, manager) = init(CapacityPolicy::Dynamic { initial: 2 }, Severity::Crit);
        log_channels(&manager);
        assert!(matches_mask(CHANNELS_EXPECTED, &output.lock().unwrap()));
    }

    #[test]
    fn test_channels_limit() {
        let (output, manager) = init(CapacityPolicy::Fixed(1), Severity::Crit);
        log_channels(&manager);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.logger_level("Channel"), None);
        assert!(matches_mask(
            "****-**-** **:**:**.*** [INFO ] Root: info log 42\n\
             ****-**-** **:**:**.*** [ERROR] Root: error log 42\n\
             ****-**-** **:**:**.*** [CRIT ] Root: crit log 42\n",
            &output.lock().unwrap()
        ));
    }

    #[test]
    fn test_channels_dynamic_hash() {
        let (output, manager) = init(CapacityPolicy::Dynamic { initial: 2 }, Severity::Crit);
        for i in 0..64 {
            assert!(manager.get_logger(&format!("Channel_{i}")).is_some());
        }
        log_channels(&manager);
        assert_eq!(manager.len(), 66);
        assert_eq!(manager.capacity(), 128);
        assert!(matches_mask(CHANNELS_EXPECTED, &output.lock().unwrap()));
    }

    #[test]
    fn test_root_channel_and_default_level() {
        let (_, sink) = capture();
        let manager = lite_config()
            .with_root_channel("Root")
            .with_channel_level(Severity::Notice)
            .init(sink)
            .unwrap();
        let root = manager.root_logger().unwrap();
        assert_eq!(root.channel(), "Root");
        assert_eq!(root.level(), Severity::Notice);
        assert!(root.same_channel(&manager.get_logger("Root").unwrap()));
        assert_eq!(manager.global_level(), Severity::Warning);
        assert_eq!(manager.policy(), CapacityPolicy::default());
    }

    #[test]
    fn test_raw_levels_out_of_range_are_ignored() {
        let (_, manager) = init(CapacityPolicy::default(), Severity::Info);
        manager.set_global_level_raw(9);
        assert_eq!(manager.global_level(), Severity::Info);
        manager.set_logger_level("Root", Severity::Info);
        manager.set_logger_level_raw("Root", -1);
        assert_eq!(manager.logger_level("Root"), Some(Severity::Info));
        manager.set_logger_level_raw("Root", 8);
        assert_eq!(manager.logger_level("Root"), Some(Severity::Trace));
    }

    #[test]
    fn test_gate_skips_formatting() {
        let (output, manager) = init(CapacityPolicy::default(), Severity::Error);
        let root = manager.get_logger("Root").unwrap();
        assert!(manager.can_log(Severity::Error));
        assert!(!manager.can_log(Severity::Warning));
        let mut evaluated = 0;
        logf_warn!(root, "{}", {
            evaluated += 1;
            evaluated
        });
        assert_eq!(evaluated, 0);
        assert!(output.lock().unwrap().is_empty());
    }

    #[test]
    fn test_init_fails_when_table_cannot_be_allocated() {
        let result = lite_config()
            .with_policy(CapacityPolicy::Fixed(usize::MAX))
            .init(|_, _| {});
        assert!(matches!(result, Err(Error::AllocationFailed { .. })));
    }

    #[test]
    fn test_long_channel_names_are_truncated() {
        let (output, manager) = init(CapacityPolicy::default(), Severity::Info);
        let logger = manager.get_logger("storage_replication").unwrap();
        assert_eq!(logger.channel(), "storage_replica");
        logf_info!(logger, "synced");
        assert!(output.lock().unwrap().ends_with(" [INFO ] storage_replica: synced\n"));
    }
}
