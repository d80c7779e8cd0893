//! Navigation bar menu

use std::sync::Arc;
use tracing::error;
use crate::state::{SessionState, SessionStore};
use super::navigation::{Navigator, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Go { label: &'static str, route: Route },
    Logout,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Go { label, .. } => *label,
            MenuItem::Logout => "Logout",
        }
    }
}

pub struct Navbar {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl Navbar {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Menu entries for the given session
    pub fn menu(state: &SessionState) -> Vec<MenuItem> {
        let mut items = vec![
            MenuItem::Go { label: "Home", route: Route::Home },
            MenuItem::Go { label: "Contact", route: Route::Contact },
            MenuItem::Go { label: "My tests", route: Route::MyTests },
        ];

        if state.is_authenticated {
            items.push(MenuItem::Logout);
        } else {
            items.push(MenuItem::Go { label: "Sign up", route: Route::Signup });
            items.push(MenuItem::Go { label: "Login", route: Route::Login });
        }

        items
    }

    pub async fn select(&self, item: &MenuItem) {
        match item {
            MenuItem::Go { route, .. } => self.navigator.navigate(route.clone()),
            MenuItem::Logout => self.logout().await,
        }
    }

    /// Log out and return to the login screen
    ///
    /// The session is gone locally even when the backend call fails, so the
    /// failure is only logged here.
    pub async fn logout(&self) {
        match self.session.logout().await {
            Ok(()) => self.navigator.navigate(Route::Login),
            Err(e) => error!(error = %e, "Logout failed"),
        }
    }
}
