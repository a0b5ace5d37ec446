//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AuthConfig, AuthMode, ConfigError, Environment, LogFormat,
    NotifyConfig, StorageBackend, StorageConfig,
};
