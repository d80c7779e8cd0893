//! Test context setup
//!
//! Builds an [`AppContext`] against a mock backend with in-memory token
//! storage, a switchable connectivity probe and an inspectable navigation
//! stack.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use registon::config::Settings;
use registon::screens::NavigationStack;
use registon::services::{ConnectivityProbe, MemoryTokenStorage};
use registon::AppContext;

/// Connectivity probe whose answer the test controls
#[derive(Debug, Default)]
pub struct SwitchProbe {
    connected: AtomicBool,
}

impl SwitchProbe {
    pub fn new(connected: bool) -> Self {
        Self { connected: AtomicBool::new(connected) }
    }

    pub fn set(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConnectivityProbe for SwitchProbe {
    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

pub struct TestContext {
    pub app: AppContext,
    pub tokens: Arc<MemoryTokenStorage>,
    pub probe: Arc<SwitchProbe>,
    pub navigation: Arc<NavigationStack>,
}

pub fn test_settings(base_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.backend.base_url = base_url.to_string();
    settings.backend.timeout_seconds = Some(5);
    settings
}

impl TestContext {
    pub fn new(base_url: &str) -> Self {
        Self::with_probe(base_url, true)
    }

    pub fn with_probe(base_url: &str, connected: bool) -> Self {
        let tokens = Arc::new(MemoryTokenStorage::new());
        let probe = Arc::new(SwitchProbe::new(connected));
        let navigation = Arc::new(NavigationStack::new());

        let app = AppContext::with_parts(
            test_settings(base_url),
            tokens.clone(),
            probe.clone(),
            navigation.clone(),
        )
        .expect("failed to build test context");

        Self { app, tokens, probe, navigation }
    }
}
