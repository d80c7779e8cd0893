//! Navigation routes
//!
//! The navigation framework itself is external; screens only talk to it
//! through [`Navigator`]. [`NavigationStack`] is a plain in-memory stack used
//! by the command-line front end and by tests.

use std::fmt;
use std::sync::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Named screens with their typed parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    Signup,
    Contact,
    MyTests,
    NoInternet,
    Subject { id: String, name: String },
    TestQuestions { test_id: String, test_title: String },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "Home"),
            Route::Login => write!(f, "Login"),
            Route::Signup => write!(f, "Signup"),
            Route::Contact => write!(f, "Contact"),
            Route::MyTests => write!(f, "MyTests"),
            Route::NoInternet => write!(f, "NoInternet"),
            Route::Subject { name, .. } => write!(f, "Subject({})", name),
            Route::TestQuestions { test_title, .. } => write!(f, "TestQuestions({})", test_title),
        }
    }
}

pub trait Navigator: Send + Sync {
    /// Push a route on top of the current one
    fn navigate(&self, route: Route);
    /// Swap the current route for another
    fn replace(&self, route: Route);
    fn current(&self) -> Option<Route>;
}

/// In-memory navigation stack starting at [`Route::Home`]
#[derive(Debug)]
pub struct NavigationStack {
    routes: Mutex<Vec<Route>>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::starting_at(Route::Home)
    }

    pub fn starting_at(route: Route) -> Self {
        Self { routes: Mutex::new(vec![route]) }
    }

    /// Pop the current route; the root route is never popped
    pub fn back(&self) -> Option<Route> {
        let mut routes = self.lock();
        if routes.len() > 1 {
            routes.pop()
        } else {
            None
        }
    }

    pub fn history(&self) -> Vec<Route> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.routes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for NavigationStack {
    fn navigate(&self, route: Route) {
        debug!(route = %route, "Navigating");
        self.lock().push(route);
    }

    fn replace(&self, route: Route) {
        debug!(route = %route, "Replacing current route");
        let mut routes = self.lock();
        routes.pop();
        routes.push(route);
    }

    fn current(&self) -> Option<Route> {
        self.lock().last().cloned()
    }
}
