//! Configuration management for banklink
//!
//! This module handles loading, validation, and management of
//! banklink configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::ConfigError;
use error::ConfigResult;

// ==================== Configuration Types ====================

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the local key-value file
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./.banklink/session.json")
}

/// Statement export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementConfig {
    /// Directory exported statements are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Document title
    #[serde(default = "default_title")]
    pub title: String,
    /// Holder name used when nothing better is known
    #[serde(default = "default_holder")]
    pub default_holder: String,
    /// Preferred export format
    #[serde(default)]
    pub format: StatementFormat,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            title: default_title(),
            default_holder: default_holder(),
            format: StatementFormat::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./statements")
}

fn default_title() -> String {
    "BANK-LINK STATEMENT".to_string()
}

fn default_holder() -> String {
    "Bank-Link User".to_string()
}

/// Statement format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementFormat {
    /// PDF with CSV fallback
    Pdf,
    /// CSV only
    Csv,
}

impl Default for StatementFormat {
    fn default() -> Self {
        StatementFormat::Pdf
    }
}

impl StatementFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            StatementFormat::Pdf => "pdf",
            StatementFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for StatementFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(StatementFormat::Pdf),
            "csv" => Ok(StatementFormat::Csv),
            _ => Err(format!("Invalid statement format: {}", s)),
        }
    }
}

impl std::fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Toast visibility in milliseconds
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration(),
        }
    }
}

fn default_toast_duration() -> u64 {
    3000
}

/// Currency display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol prefixed to every amount
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_symbol() -> String {
    "R".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
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

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Session store settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Statement export settings
    #[serde(default)]
    pub statement: StatementConfig,
    /// Notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Load the file if present, otherwise fall back to defaults
    pub fn load_or_default(path: PathBuf) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse and validate YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|_| ConfigError::InvalidYaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api.base_url".to_string(),
            });
        }

        // The HTTP client carries no TLS connector
        if !base_url.starts_with("http://") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base URL must use the http:// scheme".to_string(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.notifications.toast_duration_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "Toasts with a zero duration are never visible".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Write the default configuration to `path`, refusing to overwrite
    pub async fn write_default(path: &Path) -> ConfigResult<()> {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ConfigError::ValidationError {
                message: format!("{} already exists", path.display()),
            });
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|_| ConfigError::IoError)?;
        }
        tokio::fs::write(path, Self::generate_default())
            .await
            .map_err(|_| ConfigError::IoError)
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Toast visibility as a `Duration`
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.toast_duration_ms)
    }
}
