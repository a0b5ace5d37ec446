//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub notify: NotifyConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Which key-value store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// How sign-in credentials are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Per-user accounts from the staff directory
    #[default]
    Directory,
    /// One shared passphrase, any non-empty name
    Passphrase,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    pub passphrase: Option<String>,
}

/// Change notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_notify_delay_ms")]
    pub delay_ms: u64,
}

impl NotifyConfig {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

// Default value functions
fn default_app_name() -> String {
    "arcade-portal".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./portal-data")
}

fn default_notify_delay_ms() -> u64 {
    100
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable holds an invalid value, or if passphrase
    /// mode is selected without a passphrase
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env = match var("APP_ENV") {
            Some(s) => match s.to_lowercase().as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
            None => default_env(),
        };

        let log_format = match var("LOG_FORMAT") {
            Some(s) => match s.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::InvalidValue("LOG_FORMAT", s)),
            },
            None if env.is_production() => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        let backend = match var("PORTAL_STORAGE") {
            Some(s) => match s.to_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                _ => return Err(ConfigError::InvalidValue("PORTAL_STORAGE", s)),
            },
            None => StorageBackend::default(),
        };

        let mode = match var("PORTAL_AUTH_MODE") {
            Some(s) => match s.to_lowercase().as_str() {
                "directory" => AuthMode::Directory,
                "passphrase" => AuthMode::Passphrase,
                _ => return Err(ConfigError::InvalidValue("PORTAL_AUTH_MODE", s)),
            },
            None => AuthMode::default(),
        };

        let passphrase = var("PORTAL_PASSPHRASE");
        if mode == AuthMode::Passphrase && passphrase.is_none() {
            return Err(ConfigError::MissingVar("PORTAL_PASSPHRASE"));
        }

        let delay_ms = match var("PORTAL_NOTIFY_DELAY_MS") {
            Some(s) => s
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORTAL_NOTIFY_DELAY_MS", s))?,
            None => default_notify_delay_ms(),
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env,
                log_format,
            },
            storage: StorageConfig {
                backend,
                data_dir: var("PORTAL_DATA_DIR").map_or_else(default_data_dir, PathBuf::from),
            },
            auth: AuthConfig { mode, passphrase },
            notify: NotifyConfig { delay_ms },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.app.name, "arcade-portal");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir, PathBuf::from("./portal-data"));
        assert_eq!(config.auth.mode, AuthMode::Directory);
        assert_eq!(config.notify.delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("APP_NAME", "pixoul"),
            ("APP_ENV", "Staging"),
            ("PORTAL_STORAGE", "memory"),
            ("PORTAL_DATA_DIR", "/var/lib/portal"),
            ("PORTAL_AUTH_MODE", "passphrase"),
            ("PORTAL_PASSPHRASE", "open sesame"),
            ("PORTAL_NOTIFY_DELAY_MS", "5"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.app.name, "pixoul");
        assert_eq!(config.app.env, Environment::Staging);
        assert_eq!(config.app.log_format, LogFormat::Json);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/portal"));
        assert_eq!(config.auth.mode, AuthMode::Passphrase);
        assert_eq!(config.auth.passphrase.as_deref(), Some("open sesame"));
        assert_eq!(config.notify.delay_ms, 5);
    }

    #[test]
    fn test_production_defaults_to_json_logs() {
        let config = config_from(&[("APP_ENV", "production")]).unwrap();
        assert_eq!(config.app.log_format, LogFormat::Json);
    }

    #[test]
    fn test_passphrase_mode_requires_passphrase() {
        let err = config_from(&[("PORTAL_AUTH_MODE", "passphrase")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("PORTAL_PASSPHRASE")));

        let err = config_from(&[("PORTAL_AUTH_MODE", "passphrase"), ("PORTAL_PASSPHRASE", "  ")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("PORTAL_PASSPHRASE")));
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[("PORTAL_STORAGE", "sqlite")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("PORTAL_STORAGE", _)));

        let err = config_from(&[("PORTAL_NOTIFY_DELAY_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("PORTAL_NOTIFY_DELAY_MS", _)));

        let err = config_from(&[("LOG_FORMAT", "xml")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for LOG_FORMAT: xml");
    }
}
