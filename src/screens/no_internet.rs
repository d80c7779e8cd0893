//! Offline fallback screen

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;
use crate::services::connectivity::ConnectivityProbe;
use super::navigation::{Navigator, Route};

pub const OFFLINE_TITLE: &str = "No internet connection";
pub const OFFLINE_HINT: &str = "Check your connection and try again.";

pub struct NoInternetScreen {
    probe: Arc<dyn ConnectivityProbe>,
    navigator: Arc<dyn Navigator>,
}

impl NoInternetScreen {
    pub fn new(probe: Arc<dyn ConnectivityProbe>, navigator: Arc<dyn Navigator>) -> Self {
        Self { probe, navigator }
    }

    /// Query connectivity once and leave the screen if it is back
    pub async fn recheck(&self) -> bool {
        let connected = self.probe.is_connected().await;
        if connected {
            self.leave();
        } else {
            info!("Still offline");
        }
        connected
    }

    /// Wait for connectivity to come back, then leave the screen
    ///
    /// Returns false if the sender went away while still offline.
    pub async fn watch(&self, mut connectivity: watch::Receiver<bool>) -> bool {
        match connectivity.wait_for(|connected| *connected).await {
            Ok(_) => {
                self.leave();
                true
            }
            Err(_) => false,
        }
    }

    fn leave(&self) {
        info!("Connectivity restored");
        self.navigator.replace(Route::Home);
    }
}
