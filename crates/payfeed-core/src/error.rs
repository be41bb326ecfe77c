//! Error types for payfeed-core
//!
//! Every failure the store can report carries a stable code, a severity
//! and a human-readable message. The presentation layer only ever sees
//! kind + message; nothing richer crosses that boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input rejected by validation
    ValidationError,
    /// Unknown transaction id
    NotFound,
    /// Snapshot slot unreadable or corrupt
    PersistenceReadError,
    /// Snapshot slot could not be written
    PersistenceWriteError,
    /// Snapshot could not be encoded
    SerializationError,
    /// Configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::PersistenceReadError => write!(f, "PERSISTENCE_READ_ERROR"),
            ErrorCode::PersistenceWriteError => write!(f, "PERSISTENCE_WRITE_ERROR"),
            ErrorCode::SerializationError => write!(f, "SERIALIZATION_ERROR"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Recovered locally, operation aborted
    Info,
    /// Operation succeeded or was recovered, but something needs attention
    Warning,
    /// Operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    /// Offending input field (validation errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            field: None,
            suggestions: vec![],
        }
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for suggestion in &self.suggestions {
            write!(f, "\n  - {}", suggestion)?;
        }
        Ok(())
    }
}

/// Main error type for payfeed-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Transaction not found: {id}")]
    NotFound { id: u64 },

    #[error("Could not read snapshot: {message}")]
    PersistenceRead { message: String },

    #[error("Could not write snapshot: {message}")]
    PersistenceWrite { message: String },

    #[error("Could not encode snapshot: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::PersistenceRead { .. } => ErrorCode::PersistenceReadError,
            CoreError::PersistenceWrite { .. } => ErrorCode::PersistenceWriteError,
            CoreError::Serialization { .. } => ErrorCode::SerializationError,
            CoreError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Validation { .. } => ErrorSeverity::Info,
            CoreError::NotFound { .. } => ErrorSeverity::Info,
            CoreError::PersistenceRead { .. } => ErrorSeverity::Warning,
            CoreError::PersistenceWrite { .. } => ErrorSeverity::Warning,
            CoreError::Serialization { .. } => ErrorSeverity::Error,
            CoreError::Config { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Validation { field, .. } => {
                details = details.with_field(field);
            }
            CoreError::NotFound { .. } => {
                details = details.with_suggestion(
                    "List the feed to see the ids that currently exist.".to_string(),
                );
            }
            CoreError::PersistenceWrite { .. } => {
                details = details.with_suggestion(
                    "The change is kept in memory and will be saved with the next change.".to_string(),
                );
                details = details.with_suggestion(
                    "Check that the storage directory exists and is writable.".to_string(),
                );
            }
            _ => {}
        }

        details
    }

    /// Log the error at a level matching its severity
    pub fn log(&self, operation: &str) {
        match self.severity() {
            ErrorSeverity::Info => log::info!(
                target: "payfeed::error",
                "{} rejected: [{}] {}",
                operation,
                self.code(),
                self
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "payfeed::error",
                "{}: [{}] {}",
                operation,
                self.code(),
                self
            ),
            ErrorSeverity::Error => log::error!(
                target: "payfeed::error",
                "{} failed: {}",
                operation,
                self.to_details()
            ),
        }
    }
}

impl From<payfeed_config::ConfigError> for CoreError {
    fn from(error: payfeed_config::ConfigError) -> Self {
        CoreError::Config {
            message: error.to_string(),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
