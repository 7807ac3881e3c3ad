use std::sync::LazyLock;

use derive_from_env::FromEnv;

use crate::severity::Severity;

/// Settings read from `CHANLOG_*` environment variables.
#[derive(FromEnv)]
#[from_env(prefix = "CHANLOG")]
#[allow(non_snake_case)]
pub struct ChanlogConfig {
    #[from_env(default = "warning")]
    pub GLOBAL_LEVEL: String,
    #[from_env(default = "debug")]
    pub CHANNEL_LEVEL: String,
    #[from_env(default = "false")]
    pub FREEZE: bool,
}

impl Default for ChanlogConfig {
    fn default() -> Self {
        Self {
            GLOBAL_LEVEL: Severity::Warning.to_string(),
            CHANNEL_LEVEL: Severity::Debug.to_string(),
            FREEZE: false,
        }
    }
}

impl ChanlogConfig {
    pub fn global_level(&self) -> Severity {
        parse_or(
            &self.GLOBAL_LEVEL,
            "CHANLOG_GLOBAL_LEVEL",
            Severity::Warning,
        )
    }

    pub fn channel_level(&self) -> Severity {
        parse_or(
            &self.CHANNEL_LEVEL,
            "CHANLOG_CHANNEL_LEVEL",
            Severity::Debug,
        )
    }
}

fn parse_or(value: &str, var: &str, fallback: Severity) -> Severity {
    value.parse().unwrap_or_else(|err| {
        log::warn!(target: "chanlog", "{var}: {err}, using {fallback}");
        fallback
    })
}

pub static CHANLOG_CONFIG: LazyLock<ChanlogConfig> = LazyLock::new(|| {
    ChanlogConfig::from_env().unwrap_or_else(|_| {
        log::warn!(target: "chanlog", "invalid CHANLOG_* environment, using defaults");
        ChanlogConfig::default()
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChanlogConfig::default();
        assert_eq!(config.global_level(), Severity::Warning);
        assert_eq!(config.channel_level(), Severity::Debug);
        assert!(!config.FREEZE);
    }

    #[test]
    fn test_unparsable_level_falls_back() {
        let config = ChanlogConfig {
            GLOBAL_LEVEL: "loud".into(),
            CHANNEL_LEVEL: "3".into(),
            FREEZE: true,
        };
        assert_eq!(config.global_level(), Severity::Warning);
        assert_eq!(config.channel_level(), Severity::Error);
    }
}
