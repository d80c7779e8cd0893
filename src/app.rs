//! Application context
//!
//! Everything a screen needs is built once here at the application root and
//! handed down by `Arc`.

use std::sync::Arc;
use tracing::{info, warn};
use crate::config::Settings;
use crate::screens::{
    HomeScreen, LoginScreen, Navbar, NavigationStack, Navigator, NoInternetScreen, Route, SignupScreen,
    SubjectTestsScreen,
};
use crate::services::{
    ApiClient, ConnectivityProbe, FileTokenStorage, HttpConnectivityProbe, NotificationCenter, Notifier, TokenStorage,
};
use crate::state::{CatalogStore, SessionStore};
use crate::utils::errors::Result;

/// Shared client state and collaborators
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub api: ApiClient,
    pub session: Arc<SessionStore>,
    pub catalog: Arc<CatalogStore>,
    pub notifications: Arc<NotificationCenter>,
    pub connectivity: Arc<dyn ConnectivityProbe>,
    pub navigator: Arc<dyn Navigator>,
}

impl AppContext {
    /// Build the context with file token storage and an HTTP connectivity probe
    pub fn new(settings: Settings) -> Result<Self> {
        let tokens: Arc<dyn TokenStorage> = Arc::new(FileTokenStorage::new(settings.storage.token_path.clone()));
        let probe: Arc<dyn ConnectivityProbe> =
            Arc::new(HttpConnectivityProbe::new(settings.probe_url(), &settings.connectivity)?);
        let navigator: Arc<dyn Navigator> = Arc::new(NavigationStack::new());

        Self::with_parts(settings, tokens, probe, navigator)
    }

    /// Build the context around caller-supplied storage, probe and navigator
    pub fn with_parts(
        settings: Settings,
        tokens: Arc<dyn TokenStorage>,
        connectivity: Arc<dyn ConnectivityProbe>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let api = ApiClient::new(&settings.backend)?;
        let notifications = Arc::new(NotificationCenter::new(settings.notifications.queue_capacity));

        let session = Arc::new(SessionStore::new(api.clone(), tokens));
        let catalog = Arc::new(CatalogStore::new(api.clone(), notifications.clone()));

        Ok(Self {
            settings,
            api,
            session,
            catalog,
            notifications,
            connectivity,
            navigator,
        })
    }

    /// Startup sequence
    ///
    /// Loads the persisted token, then checks connectivity. Offline, the
    /// current route is replaced by [`Route::NoInternet`] and the session
    /// check is skipped. Returns whether the backend was reachable.
    pub async fn start(&self) -> bool {
        match self.session.restore_token().await {
            Ok(Some(_)) => info!("Restored persisted token"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Could not read persisted token"),
        }

        if !self.connectivity.is_connected().await {
            warn!(base_url = %self.api.base_url(), "Backend unreachable, showing offline screen");
            self.navigator.replace(Route::NoInternet);
            return false;
        }

        self.session.check_auth().await;
        true
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifications.clone()
    }

    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(self.session.clone(), self.notifier(), self.navigator.clone())
    }

    pub fn signup_screen(&self) -> SignupScreen {
        SignupScreen::new(self.session.clone(), self.notifier(), self.navigator.clone())
    }

    pub fn home_screen(&self) -> HomeScreen {
        HomeScreen::new(self.catalog.clone(), self.notifier(), self.navigator.clone())
    }

    pub fn subject_tests_screen(&self, subject_id: impl Into<String>, subject_name: impl Into<String>) -> SubjectTestsScreen {
        SubjectTestsScreen::new(self.catalog.clone(), self.navigator.clone(), subject_id, subject_name)
    }

    pub fn navbar(&self) -> Navbar {
        Navbar::new(self.session.clone(), self.navigator.clone())
    }

    pub fn no_internet_screen(&self) -> NoInternetScreen {
        NoInternetScreen::new(self.connectivity.clone(), self.navigator.clone())
    }
}
