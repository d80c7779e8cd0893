//! Connectivity probing and change notifications
//!
//! Device network detection is outside the client; this module only answers
//! "can we reach the backend right now" and turns repeated answers into change
//! notifications on a `watch` channel.

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use crate::config::ConnectivityConfig;
use crate::utils::errors::{ApiError, RegistonError, Result};

/// One-shot connectivity query
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_connected(&self) -> bool;
}

/// Treats any HTTP answer from the probe URL as "connected"
#[derive(Debug, Clone)]
pub struct HttpConnectivityProbe {
    client: Client,
    url: String,
}

impl HttpConnectivityProbe {
    pub fn new(url: impl Into<String>, config: &ConnectivityConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.probe_timeout_seconds))
            .build()
            .map_err(|e| RegistonError::Api(ApiError::RequestFailed(e.to_string())))?;

        Ok(Self { client, url: url.into() })
    }
}

#[async_trait]
impl ConnectivityProbe for HttpConnectivityProbe {
    async fn is_connected(&self) -> bool {
        match self.client.head(&self.url).send().await {
            Ok(response) => {
                debug!(url = %self.url, status = response.status().as_u16(), "Connectivity probe answered");
                true
            }
            Err(e) => {
                debug!(url = %self.url, error = %e, "Connectivity probe failed");
                false
            }
        }
    }
}

/// Polls a probe and publishes connectivity only when it changes
pub struct ConnectivityMonitor {
    probe: Arc<dyn ConnectivityProbe>,
    interval: Duration,
}

impl ConnectivityMonitor {
    pub fn new(probe: Arc<dyn ConnectivityProbe>, interval: Duration) -> Self {
        Self { probe, interval }
    }

    /// Start polling in the background
    ///
    /// The receiver starts with the result of an immediate first probe. The task
    /// ends once every receiver has been dropped.
    pub async fn spawn(self) -> (watch::Receiver<bool>, JoinHandle<()>) {
        let initial = self.probe.is_connected().await;
        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }

                let connected = self.probe.is_connected().await;
                let changed = tx.send_if_modified(|current| {
                    if *current != connected {
                        *current = connected;
                        true
                    } else {
                        false
                    }
                });

                if changed {
                    info!(connected = connected, "Connectivity changed");
                }
            }
        });

        (rx, handle)
    }
}
