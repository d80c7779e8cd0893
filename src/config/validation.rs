//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{RegistonError, Result};
use super::Settings;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_backend_config(&settings.backend)?;
    validate_storage_config(&settings.storage)?;
    validate_connectivity_config(&settings.connectivity)?;
    validate_notifications_config(&settings.notifications)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(RegistonError::Config(
            "Backend base URL is required".to_string()
        ));
    }

    let url = url::Url::parse(&config.base_url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(RegistonError::Config(
            format!("Backend URL must use http or https, got {}", url.scheme())
        ));
    }

    if config.timeout_seconds == Some(0) {
        return Err(RegistonError::Config(
            "Backend timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

/// Validate token storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.token_path.as_os_str().is_empty() {
        return Err(RegistonError::Config(
            "Token storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate connectivity configuration
fn validate_connectivity_config(config: &super::ConnectivityConfig) -> Result<()> {
    if let Some(ref probe_url) = config.probe_url {
        url::Url::parse(probe_url)?;
    }

    if config.probe_timeout_seconds == 0 {
        return Err(RegistonError::Config(
            "Connectivity probe timeout must be greater than 0".to_string()
        ));
    }

    if config.poll_interval_ms == 0 {
        return Err(RegistonError::Config(
            "Connectivity poll interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate notifications configuration
fn validate_notifications_config(config: &super::NotificationsConfig) -> Result<()> {
    if config.queue_capacity == 0 {
        return Err(RegistonError::Config(
            "Notification queue capacity must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    // Plain levels only; anything with a directive goes through RUST_LOG instead.
    let level = config.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(RegistonError::Config(
            format!("Invalid log level: {}", config.level)
        ));
    }

    Ok(())
}
