//! Mock Registon backend for testing
//!
//! A wiremock server answering the Registon REST endpoints with configurable
//! bodies, statuses and delays.

use std::time::Duration;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Registon backend
pub struct BackendMockServer {
    pub server: MockServer,
}

impl BackendMockServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer `method path` with `status` and a JSON body
    pub async fn mock_json(&self, http_method: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `method path` with `status` and a JSON body, after `delay`
    pub async fn mock_json_delayed(&self, http_method: &str, route: &str, status: u16, body: Value, delay: Duration) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Fail the test if `method path` is ever called
    pub async fn forbid(&self, http_method: &str, route: &str) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Expect exactly one `POST` of the given answers to the check endpoint
    pub async fn expect_answers(&self, test_id: &str, answers: Value, result: Value) {
        Mock::given(method("POST"))
            .and(path(format!("/student/checkAnswers/{}", test_id)))
            .and(body_json(json!({ "student_questionsMassive": answers })))
            .respond_with(ResponseTemplate::new(200).set_body_json(result))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_subjects(&self, subjects: Value) {
        self.mock_json("GET", "/api/get_tests/tests", 200, json!({ "subjects": subjects })).await;
    }

    pub async fn mock_statistics(&self, statistics: Value) {
        self.mock_json("GET", "/api/get/Statistics", 200, statistics).await;
    }

    pub async fn mock_my_tests(&self, subject_id: &str, tests: Value) {
        self.mock_json("GET", &format!("/get_tests/getMytest/{}", subject_id), 200, json!({ "Mytests": tests }))
            .await;
    }

    pub async fn mock_login(&self, user: Value) {
        self.mock_json("POST", "/api/auth/login", 200, user).await;
    }

    pub async fn verify(&self) {
        self.server.verify().await;
    }
}
