//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Registon client.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{ErrorSeverity, RegistonError, Result};

/// Initialize logging based on configuration
///
/// `RUST_LOG` wins over the configured level when it is set. The returned guard
/// must be kept alive for file output to be flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| RegistonError::Config(format!("Invalid log filter: {}", e)))?;

    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match config.directory {
        Some(ref directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "registon.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RegistonError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a completed backend request
pub fn log_http_request(request_id: &str, method: &str, path: &str, status: Option<u16>, duration_ms: u64) {
    match status {
        Some(status) if status < 400 => debug!(
            request_id = request_id,
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            "Backend request completed"
        ),
        Some(status) => warn!(
            request_id = request_id,
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            "Backend request returned an error status"
        ),
        None => warn!(
            request_id = request_id,
            method = method,
            path = path,
            duration_ms = duration_ms,
            "Backend request failed before a response arrived"
        ),
    }
}

/// Log a failure caught at a store boundary, at a level matching its severity
pub fn log_store_failure(store: &str, action: &str, err: &RegistonError) {
    match err.severity() {
        ErrorSeverity::Info => debug!(store = store, action = action, error = %err, "Store action rejected"),
        ErrorSeverity::Warning => warn!(store = store, action = action, error = %err, "Store action failed"),
        ErrorSeverity::Error | ErrorSeverity::Critical => error!(
            store = store,
            action = action,
            error = %err,
            recoverable = err.is_recoverable(),
            "Store action failed"
        ),
    }
}

/// Log session transitions
pub fn log_session_change(action: &str, user_id: Option<&str>, authenticated: bool) {
    info!(
        action = action,
        user_id = user_id,
        authenticated = authenticated,
        "Session state changed"
    );
}
