//! Login and signup screens

use std::sync::Arc;
use tracing::info;
use crate::models::User;
use crate::services::notification::{Notifier, Toast};
use crate::state::SessionStore;
use crate::utils::errors::{RegistonError, Result};
use super::forms::{LoginForm, SignupForm};
use super::navigation::{Navigator, Route};

/// Login screen
pub struct LoginScreen {
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl LoginScreen {
    pub fn new(session: Arc<SessionStore>, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, notifier, navigator }
    }

    /// Validate the form, log in and go home
    ///
    /// Every failure is toasted here; the error is still returned so the
    /// caller can keep the form open.
    pub async fn submit(&self, form: &LoginForm) -> Result<User> {
        if let Err(e) = form.validate() {
            self.notifier.show(Toast::error(format!("‼️ {}", e)));
            return Err(RegistonError::Validation(e));
        }

        match self.session.login(form.email.trim(), &form.password).await {
            Ok(user) => {
                info!(user_id = %user.id, "User logged in");
                self.notifier.show(Toast::success("✅ Logged in successfully"));
                self.navigator.navigate(Route::Home);
                Ok(user)
            }
            Err(e) => {
                self.notifier.show(Toast::error(e.user_message()));
                Err(e)
            }
        }
    }

    pub fn go_to_signup(&self) {
        self.navigator.navigate(Route::Signup);
    }
}

/// Signup screen
pub struct SignupScreen {
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl SignupScreen {
    pub fn new(session: Arc<SessionStore>, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, notifier, navigator }
    }

    /// Validate the form, register and go home
    pub async fn submit(&self, form: &SignupForm) -> Result<User> {
        if let Err(e) = form.validate() {
            self.notifier.show(Toast::error(format!("‼️ {}", e)));
            return Err(RegistonError::Validation(e));
        }

        let result = self
            .session
            .signup(form.name.trim(), form.email.trim(), &form.password, &form.confirm_password)
            .await;

        match result {
            Ok(user) => {
                info!(user_id = %user.id, "User registered");
                self.notifier.show(Toast::success("✅ Registered successfully"));
                self.navigator.navigate(Route::Home);
                Ok(user)
            }
            Err(e) => {
                self.notifier.show(Toast::error(e.user_message()));
                Err(e)
            }
        }
    }

    pub fn go_to_login(&self) {
        self.navigator.navigate(Route::Login);
    }
}
