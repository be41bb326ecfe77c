//! Configuration management for payfeed
//!
//! This module handles loading, validation, and management of
//! payfeed configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Snapshot storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the snapshot slot
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Name of the durable slot (file stem of the snapshot)
    #[serde(default = "default_slot")]
    pub slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            slot: default_slot(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_slot() -> String {
    "transactions".to_string()
}

/// Currency display formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol placed in front of amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            thousands_separator: default_thousands_sep(),
        }
    }
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

/// Generated avatar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Base URL of the avatar generator
    #[serde(default = "default_avatar_base_url")]
    pub base_url: String,
    /// Background colour (hex, no leading #)
    #[serde(default = "default_avatar_background")]
    pub background: String,
    /// Text colour (hex, no leading #)
    #[serde(default = "default_avatar_color")]
    pub color: String,
    /// Image size in pixels
    #[serde(default = "default_avatar_size")]
    pub size: u32,
    #[serde(default = "default_true")]
    pub bold: bool,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: default_avatar_base_url(),
            background: default_avatar_background(),
            color: default_avatar_color(),
            size: default_avatar_size(),
            bold: true,
        }
    }
}

fn default_avatar_base_url() -> String {
    "https://ui-avatars.com/api/".to_string()
}

fn default_avatar_background() -> String {
    "00D26A".to_string()
}

fn default_avatar_color() -> String {
    "fff".to_string()
}

fn default_avatar_size() -> u32 {
    128
}

fn default_true() -> bool {
    true
}

/// Feed behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How long the "saving" state stays visible after a create/update.
    /// Zero disables it.
    #[serde(default = "default_save_delay_ms")]
    pub save_delay_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            save_delay_ms: default_save_delay_ms(),
        }
    }
}

fn default_save_delay_ms() -> u64 {
    400
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

const MAX_SAVE_DELAY_MS: u64 = 10_000;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub avatar: AvatarConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let slot = self.storage.slot.trim();
        if slot.is_empty() {
            return Err(ConfigError::invalid("storage.slot", "Slot name must not be empty"));
        }
        if slot.contains(['/', '\\']) || slot == "." || slot == ".." {
            return Err(ConfigError::invalid(
                "storage.slot",
                "Slot name must be a plain file stem without path separators",
            ));
        }

        if self
            .currency
            .thousands_separator
            .chars()
            .any(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        {
            return Err(ConfigError::invalid(
                "currency.thousands_separator",
                "Separator must not contain digits, signs or a decimal point",
            ));
        }
        if self
            .currency
            .symbol
            .chars()
            .any(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        {
            return Err(ConfigError::invalid(
                "currency.symbol",
                "Symbol must not contain digits, signs or a decimal point",
            ));
        }

        if self.avatar.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("avatar.base_url", "Base URL must not be empty"));
        }
        if !(16..=512).contains(&self.avatar.size) {
            return Err(ConfigError::invalid("avatar.size", "Size must be between 16 and 512"));
        }
        for (field, value) in [
            ("avatar.background", &self.avatar.background),
            ("avatar.color", &self.avatar.color),
        ] {
            if !is_hex_colour(value) {
                return Err(ConfigError::invalid(
                    field,
                    "Colour must be 3 or 6 hex digits without a leading #",
                ));
            }
        }

        if self.feed.save_delay_ms > MAX_SAVE_DELAY_MS {
            return Err(ConfigError::invalid(
                "feed.save_delay_ms",
                format!("Delay must not exceed {} ms", MAX_SAVE_DELAY_MS),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("Level must be one of: {}", LOG_LEVELS.join(", ")),
            ));
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.storage.path.join(format!("{}.json", self.storage.slot.trim()))
    }
}

fn is_hex_colour(value: &str) -> bool {
    matches!(value.len(), 3 | 6) && value.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.slot, "transactions");
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.avatar.size, 128);
        assert_eq!(config.feed.save_delay_ms, 400);
        assert!(config.validate().is_ok());
        assert_eq!(config.snapshot_path(), PathBuf::from("./data/transactions.json"));
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml_str(Config::generate_default()).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("./data"));
        assert_eq!(config.avatar.background, "00D26A");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml_str("currency:\n  symbol: \"€\"\n").unwrap();
        assert_eq!(config.currency.symbol, "€");
        assert_eq!(config.currency.thousands_separator, ",");
        assert_eq!(config.storage.slot, "transactions");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml_str("  \n").unwrap();
        assert_eq!(config.feed.save_delay_ms, 400);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml_str("storage: [unclosed").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = Config::from_yaml_str("storage:\n  slot: \"../escape\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "storage.slot"));

        let err = Config::from_yaml_str("avatar:\n  size: 4\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "avatar.size"));

        let err = Config::from_yaml_str("avatar:\n  background: \"#00D26A\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "avatar.background"));

        let err = Config::from_yaml_str("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level"));

        let err = Config::from_yaml_str("currency:\n  thousands_separator: \"1\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        for separator in ["-", "+", "."] {
            let yaml = format!("currency:\n  thousands_separator: \"{}\"\n", separator);
            let err = Config::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "currency.thousands_separator"));
        }

        for symbol in ["1$", "-", "US$."] {
            let yaml = format!("currency:\n  symbol: \"{}\"\n", symbol);
            let err = Config::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "currency.symbol"));
        }

        let config = Config::from_yaml_str("currency:\n  symbol: \"€\"\n  thousands_separator: \" \"\n").unwrap();
        assert_eq!(config.currency.symbol, "€");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/payfeed/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
