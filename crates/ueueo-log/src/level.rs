//! Severity scale used for threshold filtering and sink dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Log severity, ordered from least to most important.
///
/// `None` is a threshold sentinel meaning "suppress everything". It ranks
/// above every real level and is never the level of an emitted record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Low-value chatter
    #[default]
    Verbose = 1,
    /// Debugging information; structured payloads are always emitted here
    Debug = 2,
    /// General informational messages
    Info = 3,
    /// Something the developer should look at
    Warn = 4,
    /// Caught failures
    Error = 5,
    /// Conditions that should never happen
    Assert = 6,
    /// Threshold only: emit nothing
    None = 7,
}

impl Level {
    /// All levels a record can carry, in rank order.
    pub const RECORD_LEVELS: [Level; 6] = [
        Level::Verbose,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Assert,
    ];

    /// Numeric rank used for filtering.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Single-letter priority written by the file sink.
    ///
    /// Assert records are written with the error letter.
    pub fn letter(self) -> char {
        match self {
            Level::Verbose | Level::None => 'V',
            Level::Debug => 'D',
            Level::Info => 'I',
            Level::Warn => 'W',
            Level::Error | Level::Assert => 'E',
        }
    }

    /// Parse a level name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "verbose" | "v" => Some(Self::Verbose),
            "debug" | "d" => Some(Self::Debug),
            "info" | "i" => Some(Self::Info),
            "warn" | "warning" | "w" => Some(Self::Warn),
            "error" | "e" => Some(Self::Error),
            "assert" | "wtf" | "a" => Some(Self::Assert),
            "none" | "off" => Some(Self::None),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Verbose => "VERBOSE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Assert => "ASSERT",
            Level::None => "NONE",
        };
        f.write_str(name)
    }
}

/// Whether a record at `level` passes the configured `threshold`.
pub fn should_emit(level: Level, threshold: Level) -> bool {
    level.rank() >= threshold.rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_totally_ordered() {
        assert!(Level::Verbose < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Assert);
        assert!(Level::Assert < Level::None);
    }

    #[test]
    fn test_should_emit_matrix() {
        for level in Level::RECORD_LEVELS {
            for threshold in Level::RECORD_LEVELS {
                assert_eq!(should_emit(level, threshold), level.rank() >= threshold.rank());
            }
        }
    }

    #[test]
    fn test_none_threshold_suppresses_everything() {
        for level in Level::RECORD_LEVELS {
            assert!(!should_emit(level, Level::None));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(Level::parse("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::parse("wtf"), Some(Level::Assert));
        assert_eq!(Level::parse(" off "), Some(Level::None));
        assert_eq!(Level::parse("loud"), None);
    }

    #[test]
    fn test_letters() {
        assert_eq!(Level::Info.letter(), 'I');
        assert_eq!(Level::Assert.letter(), 'E');
    }

    #[test]
    fn test_serde_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: Level,
        }
        let parsed: Wrapper = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(parsed.level, Level::Warn);
    }
}
