//! Settings validation.

use crate::error::ConfigError;

use super::LogSettings;

impl LogSettings {
    /// Validate values that would break rendering or file routing.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.general.tag.contains(|c: char| c == '[' || c == ']') {
            return Err(ConfigError::ValidationError(
                "general.tag must not contain '[' or ']'".into(),
            ));
        }
        if self.file.dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "file.dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_pass_validation() {
        assert!(LogSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bracketed_tag() {
        let mut settings = LogSettings::default();
        settings.general.tag = "App[1]".into();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("general.tag"));
    }

    #[test]
    fn test_validate_rejects_empty_dir() {
        let mut settings = LogSettings::default();
        settings.file.dir = "  ".into();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("file.dir"));
    }

    #[test]
    fn test_negative_method_count_is_not_a_validation_error() {
        let mut settings = LogSettings::default();
        settings.general.method_count = -3;
        assert!(settings.validate().is_ok());
    }
}
