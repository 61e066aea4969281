//! crates/logging/src/levels.rs
//! Severity levels understood by the diagnostic sink.

use std::fmt;
use std::str::FromStr;

/// Severity attached to every diagnostic.
///
/// Levels are ordered from least to most verbose, so a configured threshold
/// admits every level that compares less than or equal to it. [`LogLevel::Off`]
/// is only meaningful as a threshold and silences the sink entirely.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogLevel {
    /// Nothing is emitted.
    Off,
    /// The process cannot continue.
    Fatal,
    /// An operation failed.
    Error,
    /// Something degraded but work continues.
    #[default]
    Warn,
    /// Noteworthy progress.
    Info,
    /// Per-operation diagnostics.
    Debug,
    /// Per-chunk diagnostics.
    MaxDebug,
}

impl LogLevel {
    /// All levels that can be attached to a message, most severe first.
    pub const MESSAGE_LEVELS: [Self; 6] = [
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::MaxDebug,
    ];

    /// Returns the lowercase name used in rendered lines and config tokens.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::MaxDebug => "maxdebug",
        }
    }

    /// Maps a `-v` style repeat count onto a threshold.
    ///
    /// Zero keeps the default (`warn`); each additional step admits one more
    /// level until `maxdebug` is reached.
    #[must_use]
    pub const fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::MaxDebug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "fatal" => Ok(Self::Fatal),
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "maxdebug" | "trace" => Ok(Self::MaxDebug),
            "" => Err("empty log level".to_string()),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_verbosity() {
        assert!(LogLevel::Off < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Error);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Debug < LogLevel::MaxDebug);
    }

    #[test]
    fn default_is_warn() {
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }

    #[test]
    fn parse_accepts_names_and_aliases() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" trace ".parse::<LogLevel>(), Ok(LogLevel::MaxDebug));
        assert_eq!("none".parse::<LogLevel>(), Ok(LogLevel::Off));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!("loud".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for level in LogLevel::MESSAGE_LEVELS {
            assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        }
    }

    #[test]
    fn verbosity_count_saturates_at_maxdebug() {
        assert_eq!(LogLevel::from_verbosity(0), LogLevel::Warn);
        assert_eq!(LogLevel::from_verbosity(2), LogLevel::Debug);
        assert_eq!(LogLevel::from_verbosity(9), LogLevel::MaxDebug);
    }
}
