//! Persisted settings sections with their defaults.

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::sink::FileSink;

/// Built-in tag used when neither an override nor a configured tag is set.
pub const DEFAULT_TAG: &str = "UEUEO";

/// General record settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Default tag for every record
    pub tag: String,

    /// Number of caller frames shown in a framed record's header
    pub method_count: i32,

    /// Append `[thread name]` to the tag
    pub show_thread_info: bool,

    /// Route records to file-backed sinks by default
    pub print_to_file: bool,

    /// Minimum severity that is emitted
    pub level: Level,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            method_count: 1,
            show_thread_info: true,
            print_to_file: false,
            level: Level::Verbose,
        }
    }
}

/// File sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Base log directory (supports `~`)
    pub dir: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            dir: FileSink::default_dir().to_string_lossy().into_owned(),
        }
    }
}

/// Everything that can be loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// General settings
    pub general: GeneralSettings,

    /// File sink settings
    pub file: FileSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_defaults() {
        let general = GeneralSettings::default();
        assert_eq!(general.tag, "UEUEO");
        assert_eq!(general.method_count, 1);
        assert!(general.show_thread_info);
        assert!(!general.print_to_file);
        assert_eq!(general.level, Level::Verbose);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: LogSettings = toml::from_str("[general]\ntag = \"App\"\n").unwrap();
        assert_eq!(settings.general.tag, "App");
        assert_eq!(settings.general.method_count, 1);
        assert!(settings.file.dir.ends_with("UELOG"));
    }
}
