//! Configuration registry for the printer.
//!
//! Settings are loaded from `config.toml` in the platform config directory
//! with sensible defaults. The registry also owns the ordered list of sinks,
//! which is runtime-only and never serialized.
//!
//! The registry is meant to be mutated rarely (typically once at startup)
//! and read on every log call. It is not guarded by the printer's dispatch
//! critical section.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::level::Level;
use crate::sink::{ConsoleSink, FileSink, Sink};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings plus the ordered, identity-deduplicated sink registry.
#[derive(Clone)]
pub struct LogConfig {
    settings: LogSettings,
    sinks: Vec<Arc<dyn Sink>>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_settings(LogSettings::default())
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogConfig")
            .field("settings", &self.settings)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl LogConfig {
    /// Build a registry from settings with the console and file sinks
    /// registered.
    pub fn from_settings(settings: LogSettings) -> Self {
        let mut config = Self::with_sinks(settings, Vec::new());
        let log_dir = config.log_dir();
        config.add_sink(Arc::new(ConsoleSink::new()));
        config.add_sink(Arc::new(FileSink::new(log_dir)));
        config
    }

    /// Build a registry with exactly the given sinks.
    pub fn with_sinks(settings: LogSettings, sinks: Vec<Arc<dyn Sink>>) -> Self {
        let method_count = settings.general.method_count;
        let mut config = Self {
            settings,
            sinks: Vec::with_capacity(sinks.len()),
        };
        config.method_count(method_count);
        for sink in sinks {
            config.add_sink(sink);
        }
        config
    }

    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings: LogSettings = toml::from_str(&content)?;
        settings.validate()?;
        tracing::debug!("Loaded log settings from {}", path.display());
        Ok(Self::from_settings(settings))
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.ueueo.ueueo-log/config.toml
    /// - Linux: ~/.config/ueueo-log/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\ueueo\ueueo-log\config\config.toml
    ///
    /// Falls back to ~/.ueueo-log/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "ueueo", "ueueo-log")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".ueueo-log").join("config.toml")
            })
    }

    /// Get the resolved log directory path (with ~ expansion).
    pub fn log_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.settings.file.dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the settings to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(&self.settings)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Current settings.
    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    /// Registered sinks in registration order.
    pub fn sinks(&self) -> &[Arc<dyn Sink>] {
        &self.sinks
    }

    /// Set the default tag.
    pub fn tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.settings.general.tag = tag.into();
        self
    }

    /// Set the default number of caller frames; negative input becomes 0.
    pub fn method_count(&mut self, method_count: i32) -> &mut Self {
        self.settings.general.method_count = method_count.max(0);
        self
    }

    /// Show or hide the `[thread]` tag suffix.
    pub fn show_thread_info(&mut self, show: bool) -> &mut Self {
        self.settings.general.show_thread_info = show;
        self
    }

    /// Route records to file-backed sinks by default.
    pub fn print_to_file(&mut self, print_to_file: bool) -> &mut Self {
        self.settings.general.print_to_file = print_to_file;
        self
    }

    /// Set the minimum emitted severity.
    pub fn level(&mut self, level: Level) -> &mut Self {
        self.settings.general.level = level;
        self
    }

    /// Register a sink unless the same sink instance is already present.
    pub fn add_sink(&mut self, sink: Arc<dyn Sink>) -> &mut Self {
        if !self.sinks.iter().any(|existing| same_sink(existing, &sink)) {
            self.sinks.push(sink);
        }
        self
    }
}

/// Identity comparison on the data pointer only; vtable pointers for the
/// same type may differ across codegen units.
fn same_sink(a: &Arc<dyn Sink>, b: &Arc<dyn Sink>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.settings().general.tag, DEFAULT_TAG);
        assert_eq!(config.settings().general.method_count, 1);
        assert_eq!(config.sinks().len(), 2);
        assert!(!config.sinks()[0].is_file_backed());
        assert!(config.sinks()[1].is_file_backed());
    }

    #[test]
    fn test_method_count_setter_clamps_negative() {
        let mut config = LogConfig::default();
        config.method_count(-5);
        assert_eq!(config.settings().general.method_count, 0);
    }

    #[test]
    fn test_setters_chain() {
        let mut config = LogConfig::default();
        config
            .tag("App")
            .method_count(3)
            .print_to_file(true)
            .show_thread_info(false)
            .level(Level::Warn);
        let general = &config.settings().general;
        assert_eq!(general.tag, "App");
        assert_eq!(general.method_count, 3);
        assert!(general.print_to_file);
        assert!(!general.show_thread_info);
        assert_eq!(general.level, Level::Warn);
    }

    #[test]
    fn test_add_sink_dedups_by_identity() {
        let mut config = LogConfig::with_sinks(LogSettings::default(), Vec::new());
        let sink: Arc<dyn Sink> = Arc::new(MemorySink::new());
        config.add_sink(Arc::clone(&sink));
        config.add_sink(Arc::clone(&sink));
        assert_eq!(config.sinks().len(), 1);

        // A different instance of the same type is still added
        config.add_sink(Arc::new(MemorySink::new()));
        assert_eq!(config.sinks().len(), 2);
    }

    #[test]
    fn test_config_to_toml() {
        let config = LogConfig::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[file]"));
    }

    #[test]
    fn test_load_from_clamps_negative_method_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\ntag = \"App\"\nmethod_count = -2\nlevel = \"info\"\n",
        )
        .unwrap();

        let config = LogConfig::load_from(&path).unwrap();
        assert_eq!(config.settings().general.tag, "App");
        assert_eq!(config.settings().general.method_count, 0);
        assert_eq!(config.settings().general.level, Level::Info);
    }

    #[test]
    fn test_load_from_rejects_invalid_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ntag = \"A[b]\"\n").unwrap();

        let err = LogConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\n").unwrap();

        let err = LogConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_log_dir_expands_tilde() {
        let mut settings = LogSettings::default();
        settings.file.dir = "~/logs".into();
        let config = LogConfig::with_sinks(settings, Vec::new());
        assert!(!config.log_dir().to_string_lossy().starts_with('~'));
    }
}
