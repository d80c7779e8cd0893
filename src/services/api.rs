//! Registon backend API client
//!
//! This module wraps a single `reqwest` client bound to the configured backend,
//! classifies failures into [`ApiError`] and extracts best-effort messages from
//! error bodies.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;
use crate::config::BackendConfig;
use crate::utils::errors::{ApiError, ApiResult, RegistonError, Result};
use crate::utils::helpers::{extract_message_from_text, generate_request_id};
use crate::utils::logging::log_http_request;

/// Backend endpoint paths
pub mod endpoints {
    pub const SIGNUP: &str = "/api/auth/signup";
    pub const LOGIN: &str = "/api/auth/login";
    pub const LOGOUT: &str = "/api/auth/logout";
    pub const CHECK_AUTH: &str = "/api/auth/checkauth";
    pub const SUBJECTS: &str = "/api/get_tests/tests";
    pub const STATISTICS: &str = "/api/get/Statistics";
    pub const PROFILE_HISTORY: &str = "/profile/get_infos_of_profile";

    /// `GET /get_tests/getMytest/{subject_id}`
    pub fn subject_tests(subject_id: &str) -> String {
        format!("/get_tests/getMytest/{}", urlencoding::encode(subject_id))
    }

    /// `GET /student/get/questions/{test_id}`
    pub fn test_questions(test_id: &str) -> String {
        format!("/student/get/questions/{}", urlencoding::encode(test_id))
    }

    /// `POST /student/checkAnswers/{test_id}`
    pub fn check_answers(test_id: &str) -> String {
        format!("/student/checkAnswers/{}", urlencoding::encode(test_id))
    }
}

/// Decode a JSON body into a typed payload
pub fn decode_body<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Reject a `null` body as a soft failure
pub fn require_payload(body: Value, field: &'static str) -> ApiResult<Value> {
    if body.is_null() {
        Err(ApiError::MissingPayload { field, message: None })
    } else {
        Ok(body)
    }
}

/// Cookie jar holding the backend session cookie
///
/// Wraps a reqwest [`Jar`] that can be swapped for an empty one, so a logout
/// drops the session cookie for every clone of the client.
#[derive(Debug, Default)]
pub struct SessionCookies {
    jar: RwLock<Arc<Jar>>,
}

impl SessionCookies {
    pub fn clear(&self) {
        *self.jar.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(Jar::default());
    }

    fn current(&self) -> Arc<Jar> {
        self.jar.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

impl CookieStore for SessionCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.current().set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.current().cookies(url)
    }
}

/// HTTP client for the Registon backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    cookies: Arc<SessionCookies>,
    base_url: Url,
}

impl ApiClient {
    /// Create a new ApiClient instance
    ///
    /// The client keeps a cookie store so the session cookie set by login is
    /// replayed on later calls such as the session check. Endpoint paths are
    /// resolved below the base URL's path, so a prefix such as
    /// `https://host/registon` is kept.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let cookies = Arc::new(SessionCookies::default());
        let mut builder = Client::builder()
            .cookie_provider(cookies.clone())
            .user_agent(config.user_agent.clone());

        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| RegistonError::Api(ApiError::RequestFailed(e.to_string())))?;

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, cookies, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Forget every cookie the backend has set
    pub fn clear_cookies(&self) {
        self.cookies.clear();
        debug!("Session cookies cleared");
    }

    /// `GET` a path and return its decoded JSON body
    pub async fn get_json(&self, path: &str) -> ApiResult<Value> {
        self.send(Method::GET, path, None::<&()>).await
    }

    /// `POST` a JSON body to a path and return its decoded JSON body
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// `POST` without a body, ignoring whatever the backend answers on success
    pub async fn post_empty(&self, path: &str) -> ApiResult<()> {
        let request_id = generate_request_id();
        let url = self.endpoint(path)?;
        let started = Instant::now();

        let result = self.client.post(url).send().await;
        let elapsed = started.elapsed().as_millis() as u64;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                log_http_request(&request_id, "POST", path, None, elapsed);
                return Err(ApiError::from_transport(e));
            }
        };

        let status = response.status();
        log_http_request(&request_id, "POST", path, Some(status.as_u16()), elapsed);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_message_from_text(&text),
            });
        }

        Ok(())
    }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<Value> {
        let request_id = generate_request_id();
        let url = self.endpoint(path)?;

        debug!(request_id = %request_id, method = %method, url = %url, "Sending backend request");

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let result = request.send().await;
        let elapsed = started.elapsed().as_millis() as u64;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                log_http_request(&request_id, method.as_str(), path, None, elapsed);
                return Err(ApiError::from_transport(e));
            }
        };

        let status = response.status();
        log_http_request(&request_id, method.as_str(), path, Some(status.as_u16()), elapsed);

        let text = response.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_message_from_text(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::RequestFailed(format!("Invalid endpoint {}: {}", path, e)))
    }
}
