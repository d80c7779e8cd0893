//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub connectivity: ConnectivityConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

/// Registon backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: String,
    /// Per-request timeout. `None` leaves the platform default in place.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

/// Durable token storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub token_path: PathBuf,
}

/// Connectivity probing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectivityConfig {
    /// URL used to test reachability; the backend base URL when unset
    pub probe_url: Option<String>,
    pub probe_timeout_seconds: u64,
    pub poll_interval_ms: u64,
}

/// Toast queue configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationsConfig {
    pub queue_capacity: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily-rotated log files; console only when unset
    pub directory: Option<PathBuf>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Values are layered over [`Settings::default`], then `registon.toml` (optional),
    /// then `REGISTON__SECTION__KEY` environment variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load_from("registon")
    }

    /// Load settings using a specific configuration file stem
    pub fn load_from(file_stem: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix("REGISTON")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::RegistonError> {
        super::validation::validate_settings(self)
    }

    /// URL the connectivity probe should hit
    pub fn probe_url(&self) -> &str {
        self.connectivity
            .probe_url
            .as_deref()
            .unwrap_or(&self.backend.base_url)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://192.168.39.218:3000".to_string(),
                timeout_seconds: None,
                user_agent: format!("Registon-Client/{}", env!("CARGO_PKG_VERSION")),
            },
            storage: StorageConfig {
                token_path: PathBuf::from(".registon/session.json"),
            },
            connectivity: ConnectivityConfig {
                probe_url: None,
                probe_timeout_seconds: 3,
                poll_interval_ms: 2000,
            },
            notifications: NotificationsConfig {
                queue_capacity: 32,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                json: false,
            },
        }
    }
}
