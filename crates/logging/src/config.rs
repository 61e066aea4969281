//! crates/logging/src/config.rs
//! Sink configuration: threshold level and output destination.

use std::env;

use super::levels::LogLevel;

/// Environment variable consulted by [`LogConfig::from_env`].
pub const LOG_ENV_VAR: &str = "RANGE_SEND_LOG";

/// Where accepted diagnostics are delivered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogDestination {
    /// Render one line per diagnostic on standard error.
    #[default]
    Stderr,
    /// Keep diagnostics in the calling thread's event buffer for
    /// [`drain_events`](crate::drain_events).
    Capture,
    /// Forward diagnostics as `tracing` events.
    #[cfg(feature = "tracing")]
    Tracing,
}

/// Threshold and destination for the current thread's sink.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogConfig {
    /// Most verbose level that is still emitted.
    pub level: LogLevel,
    /// Where emitted diagnostics go.
    pub destination: LogDestination,
}

impl LogConfig {
    /// Creates a stderr configuration with the given threshold.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self {
            level,
            destination: LogDestination::Stderr,
        }
    }

    /// Creates a configuration that captures diagnostics in memory.
    #[must_use]
    pub const fn capture(level: LogLevel) -> Self {
        Self {
            level,
            destination: LogDestination::Capture,
        }
    }

    /// Creates a configuration from a `-v` repeat count.
    #[must_use]
    pub const fn from_verbose_level(count: u8) -> Self {
        Self::new(LogLevel::from_verbosity(count))
    }

    /// Reads the threshold from [`LOG_ENV_VAR`].
    ///
    /// An unset variable yields the default configuration; a set but
    /// unparsable value is reported so the caller can decide whether to abort.
    pub fn from_env() -> Result<Self, String> {
        match env::var(LOG_ENV_VAR) {
            Ok(value) => Self::from_spec(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(format!("{LOG_ENV_VAR} is not valid UTF-8")),
        }
    }

    /// Parses `LEVEL[,DESTINATION]`, e.g. `debug` or `maxdebug,capture`.
    pub fn from_spec(spec: &str) -> Result<Self, String> {
        let mut parts = spec.splitn(2, ',');
        let level = parts.next().unwrap_or_default().parse::<LogLevel>()?;
        let destination = match parts.next().map(str::trim) {
            None | Some("" | "stderr") => LogDestination::Stderr,
            Some("capture") => LogDestination::Capture,
            #[cfg(feature = "tracing")]
            Some("tracing") => LogDestination::Tracing,
            Some(other) => return Err(format!("unknown log destination: {other}")),
        };
        Ok(Self { level, destination })
    }

    /// Returns `true` when a message at `level` passes the threshold.
    #[must_use]
    pub fn admits(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level <= self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_warn_to_stderr() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.destination, LogDestination::Stderr);
    }

    #[test]
    fn admits_levels_up_to_threshold() {
        let config = LogConfig::new(LogLevel::Info);
        assert!(config.admits(LogLevel::Fatal));
        assert!(config.admits(LogLevel::Warn));
        assert!(config.admits(LogLevel::Info));
        assert!(!config.admits(LogLevel::Debug));
        assert!(!config.admits(LogLevel::MaxDebug));
    }

    #[test]
    fn off_threshold_admits_nothing() {
        let config = LogConfig::new(LogLevel::Off);
        for level in LogLevel::MESSAGE_LEVELS {
            assert!(!config.admits(level));
        }
    }

    #[test]
    fn off_is_never_a_message_level() {
        assert!(!LogConfig::new(LogLevel::MaxDebug).admits(LogLevel::Off));
    }

    #[test]
    fn from_verbose_level_maps_counts() {
        assert_eq!(LogConfig::from_verbose_level(0).level, LogLevel::Warn);
        assert_eq!(LogConfig::from_verbose_level(2).level, LogLevel::Debug);
    }

    #[test]
    fn from_spec_parses_level_only() {
        let config = LogConfig::from_spec("debug").unwrap();
        assert_eq!(config, LogConfig::new(LogLevel::Debug));
    }

    #[test]
    fn from_spec_parses_destination() {
        let config = LogConfig::from_spec("maxdebug, capture").unwrap();
        assert_eq!(config, LogConfig::capture(LogLevel::MaxDebug));
    }

    #[test]
    fn from_spec_rejects_unknown_destination() {
        let err = LogConfig::from_spec("info,syslog").unwrap_err();
        assert!(err.contains("syslog"));
    }

    #[test]
    fn from_spec_rejects_bad_level() {
        assert!(LogConfig::from_spec("chatty").is_err());
    }
}
