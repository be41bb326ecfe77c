//! Error types for payfeed-config

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    InvalidYaml,
    InvalidValue,
    IoError,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ConfigErrorCode::InvalidYaml => write!(f, "INVALID_YAML"),
            ConfigErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
            ConfigErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML format: {message}")]
    InvalidYaml { message: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("IO error occurred: {message}")]
    IoError { message: String },
}

impl ConfigError {
    /// Get the error code
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::IoError { .. } => ConfigErrorCode::IoError,
        }
    }

    /// Hint shown next to the error in the terminal
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ConfigError::FileNotFound { .. } => {
                Some("Run `payfeed init-config` or pass --config with an existing file.".to_string())
            }
            ConfigError::InvalidYaml { .. } => {
                Some("Compare your file against the output of `payfeed init-config`.".to_string())
            }
            ConfigError::InvalidValue { field, .. } => {
                Some(format!("Fix or remove '{}' to fall back to its default.", field))
            }
            ConfigError::IoError { .. } => None,
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_code() {
        let error = ConfigError::FileNotFound {
            path: "/path/to/payfeed.yaml".to_string(),
        };
        assert_eq!(error.code(), ConfigErrorCode::FileNotFound);
        assert_eq!(error.code().to_string(), "FILE_NOT_FOUND");

        let error = ConfigError::invalid("avatar.size", "too large");
        assert_eq!(error.code(), ConfigErrorCode::InvalidValue);
        assert_eq!(error.to_string(), "Invalid field value: avatar.size - too large");
    }

    #[test]
    fn test_config_error_suggestion() {
        let error = ConfigError::invalid("feed.save_delay_ms", "too long");
        assert!(error.suggestion().unwrap().contains("feed.save_delay_ms"));

        let error = ConfigError::IoError {
            message: "denied".to_string(),
        };
        assert!(error.suggestion().is_none());
    }
}
