//! Services module
//!
//! This module contains the collaborators the stores and screens build on:
//! the backend API client, token persistence, toasts and connectivity.

pub mod api;
pub mod connectivity;
pub mod notification;
pub mod token_storage;

// Re-export commonly used services
pub use api::{ApiClient, endpoints};
pub use connectivity::{ConnectivityMonitor, ConnectivityProbe, HttpConnectivityProbe};
pub use notification::{NotificationCenter, NotificationStats, Notifier, Toast, ToastKind};
pub use token_storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage, TOKEN_KEY};
