//! Session store
//!
//! Holds the signed-in user and drives signup, login, logout and the startup
//! session check. Observers follow the state through a `watch` receiver.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};
use crate::models::{LoginRequest, SignupRequest, User};
use crate::services::api::{decode_body, endpoints, ApiClient};
use crate::services::token_storage::TokenStorage;
use crate::utils::errors::{ApiError, ApiResult, RegistonError, Result, ValidationError};
use crate::utils::logging::{log_session_change, log_store_failure};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

const SIGNUP_FAILED: &str = "Signup failed";
const LOGIN_FAILED: &str = "Login failed";

/// Snapshot of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Check the signup password policy
///
/// Length is checked before the confirmation so a short password is always
/// reported as such.
pub fn validate_password(password: &str, confirm_password: &str) -> std::result::Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LENGTH });
    }

    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

/// Session store backed by the Registon auth endpoints
pub struct SessionStore {
    api: ApiClient,
    tokens: Arc<dyn TokenStorage>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create a new, signed-out SessionStore
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStorage>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { api, tokens, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Register a new account
    ///
    /// The password policy is enforced before the backend is contacted. A
    /// successful signup records the returned user but does not authenticate;
    /// the user still has to log in.
    pub async fn signup(&self, name: &str, email: &str, password: &str, confirm_password: &str) -> Result<User> {
        let _loading = self.begin();

        if let Err(e) = validate_password(password, confirm_password) {
            self.state.send_modify(|s| s.is_loading = false);
            let err = RegistonError::from(e);
            log_store_failure("session", "signup", &err);
            return Err(err);
        }

        let request = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.fetch_user(endpoints::SIGNUP, &request, SIGNUP_FAILED).await {
            Ok(user) => {
                self.state.send_modify(|s| {
                    s.user = Some(user.clone());
                    s.is_loading = false;
                });
                log_session_change("signup", Some(&user.id), self.state.borrow().is_authenticated);
                Ok(user)
            }
            Err(e) => Err(self.fail("signup", e)),
        }
    }

    /// Log in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let _loading = self.begin();

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.fetch_user(endpoints::LOGIN, &request, LOGIN_FAILED).await {
            Ok(user) => {
                self.state.send_modify(|s| {
                    s.user = Some(user.clone());
                    s.is_authenticated = true;
                    s.is_loading = false;
                });
                log_session_change("login", Some(&user.id), true);
                Ok(user)
            }
            Err(e) => Err(self.fail("login", e)),
        }
    }

    /// Log out
    ///
    /// The local session, the backend session cookie and the persisted token
    /// are torn down whatever the backend answers. A backend failure is still
    /// recorded and returned.
    pub async fn logout(&self) -> Result<()> {
        let _loading = self.begin();

        let result = self.api.post_empty(endpoints::LOGOUT).await;
        self.api.clear_cookies();

        if let Err(e) = self.tokens.clear().await {
            warn!(error = %e, "Failed to remove persisted token during logout");
        }

        self.state.send_modify(|s| {
            s.user = None;
            s.token = None;
            s.is_authenticated = false;
            s.is_loading = false;
            if let Err(ref e) = result {
                s.error = Some(e.to_string());
            }
        });
        log_session_change("logout", None, false);

        result.map_err(|e| {
            let err = RegistonError::from(e);
            log_store_failure("session", "logout", &err);
            err
        })
    }

    /// Restore the session from the backend's session cookie
    ///
    /// Never fails: any problem leaves the store signed out.
    pub async fn check_auth(&self) {
        let _loading = self.begin();

        let result = match self.api.get_json(endpoints::CHECK_AUTH).await {
            Ok(body) => decode_body::<User>(body),
            Err(e) => Err(e),
        };

        match result {
            Ok(user) => {
                let user_id = user.id.clone();
                self.state.send_modify(|s| {
                    s.user = Some(user);
                    s.is_authenticated = true;
                    s.is_loading = false;
                });
                log_session_change("check_auth", Some(&user_id), true);
            }
            Err(ApiError::Status { status, .. }) => {
                debug!(status = status, "No active session");
                self.sign_out_locally(None);
            }
            Err(e) => {
                let err = RegistonError::from(e);
                log_store_failure("session", "check_auth", &err);
                self.sign_out_locally(Some(err.user_message()));
            }
        }
    }

    /// Persist a token and keep it in memory
    pub async fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.tokens.save(&token).await?;
        self.state.send_modify(|s| s.token = Some(token));
        Ok(())
    }

    /// Load a previously persisted token into memory
    pub async fn restore_token(&self) -> Result<Option<String>> {
        let token = self.tokens.load().await?;
        if let Some(ref token) = token {
            let token = token.clone();
            self.state.send_modify(|s| s.token = Some(token));
        }
        Ok(token)
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    fn begin(&self) -> Loading<'_> {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
        Loading { state: &self.state }
    }

    async fn fetch_user<B: serde::Serialize>(&self, path: &str, request: &B, fallback: &str) -> ApiResult<User> {
        let body = self
            .api
            .post_json(path, request)
            .await
            .map_err(|e| e.with_fallback_message(fallback))?;
        decode_body(body)
    }

    fn fail(&self, action: &str, e: ApiError) -> RegistonError {
        let err = RegistonError::from(e);
        log_store_failure("session", action, &err);
        let message = err.user_message();
        self.state.send_modify(|s| {
            s.is_loading = false;
            s.error = Some(message);
        });
        err
    }

    fn sign_out_locally(&self, error: Option<String>) {
        self.state.send_modify(|s| {
            s.user = None;
            s.is_authenticated = false;
            s.is_loading = false;
            s.error = error;
        });
        log_session_change("check_auth", None, false);
    }
}

/// Clears `is_loading` if an action is abandoned before it settles
struct Loading<'a> {
    state: &'a watch::Sender<SessionState>,
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.is_loading, false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_short_password_is_rejected_first() {
        assert_matches!(
            validate_password("abc", "xyz"),
            Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LENGTH })
        );
    }

    #[test]
    fn test_mismatch_is_rejected() {
        assert_matches!(validate_password("secret1", "secret2"), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(validate_password("şifre1", "şifre1").is_ok());
        assert!(validate_password("ñññññ", "ñññññ").is_err());
    }
}
