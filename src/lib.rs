//! Registon mobile test-platform client
//!
//! Client core for the Registon learning center's test platform: session and
//! catalog stores over the Registon REST backend, client-side pagination of
//! subject tests, and an offline fallback driven by connectivity changes.

pub mod app;
pub mod config;
pub mod models;
pub mod screens;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RegistonError, Result};

// Re-export main components for easy access
pub use app::AppContext;
pub use services::ApiClient;
pub use state::{CatalogStore, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
