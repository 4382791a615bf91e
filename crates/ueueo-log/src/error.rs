//! Error types for the logging facade.
//!
//! Logging calls are meant to be safe to call from anywhere, so almost every
//! failure is recovered internally: malformed payloads degrade to sentinel
//! text and sink faults are swallowed at the sink boundary. Only
//! configuration mistakes surface to the caller, as [`ConfigError`].

use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A per-call method count override resolved to a negative value
    #[error("methodCount cannot be negative (got {0})")]
    NegativeMethodCount(i32),

    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_method_count_message() {
        let err = ConfigError::NegativeMethodCount(-2);
        assert_eq!(err.to_string(), "methodCount cannot be negative (got -2)");
    }

    #[test]
    fn test_toml_errors_convert_into_parse_error() {
        let toml_err = toml::from_str::<toml::Table>("tag = ").unwrap_err();
        let err: ConfigError = toml_err.into();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Failed to parse config"));
    }
}
