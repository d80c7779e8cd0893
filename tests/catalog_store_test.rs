//! Catalog store integration tests against a mock backend

mod helpers;

use std::time::Duration;
use helpers::*;
use registon::models::Statistics;
use registon::services::ToastKind;
use registon::state::FetchOutcome;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn test_get_subjects_populates_slice() {
    let backend = BackendMockServer::new().await;
    backend.mock_subjects(sample_subjects()).await;
    let ctx = TestContext::new(&backend.uri());

    let outcome = ctx.app.catalog.get_subjects().await;

    assert_eq!(outcome, FetchOutcome::Updated);
    let state = ctx.app.catalog.snapshot();
    assert!(!state.is_loading());
    assert_eq!(state.subjects.len(), 2);
    assert_eq!(state.subjects[0].name, "Mathematics");
    assert_eq!(state.subjects[1].image_url, "https://cdn.example.uz/english.png");
    assert!(ctx.app.notifications.drain().is_empty());
}

#[tokio::test]
async fn test_get_subjects_failure_keeps_previous_subjects() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("GET"))
        .and(path("/api/get_tests/tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "subjects": sample_subjects() })))
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    backend
        .mock_json("GET", "/api/get_tests/tests", 500, json!({ "message": "Database unavailable" }))
        .await;
    let ctx = TestContext::new(&backend.uri());

    assert_eq!(ctx.app.catalog.get_subjects().await, FetchOutcome::Updated);
    assert_eq!(ctx.app.catalog.get_subjects().await, FetchOutcome::Failed);

    let state = ctx.app.catalog.snapshot();
    assert_eq!(state.subjects.len(), 2);
    assert!(!state.is_loading());

    let toasts = ctx.app.notifications.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].title, "Could not load subjects ⚠️");
    assert_eq!(toasts[0].detail.as_deref(), Some("Database unavailable"));
}

#[tokio::test]
async fn test_get_my_tests_soft_failure() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_json("GET", "/get_tests/getMytest/s-math", 200, json!({ "message": "No tests for this subject" }))
        .await;
    let ctx = TestContext::new(&backend.uri());

    let outcome = ctx.app.catalog.get_my_tests("s-math").await;

    assert_eq!(outcome, FetchOutcome::Failed);
    let state = ctx.app.catalog.snapshot();
    assert!(state.my_tests.is_empty());
    assert!(state.my_tests_subject.is_none());

    let toasts = ctx.app.notifications.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Tests not found ⚠️");
    assert_eq!(toasts[0].detail.as_deref(), Some("No tests for this subject"));
}

#[tokio::test]
async fn test_get_my_tests_tags_subject() {
    let backend = BackendMockServer::new().await;
    backend.mock_my_tests("s-math", sample_tests(3)).await;
    let ctx = TestContext::new(&backend.uri());

    assert_eq!(ctx.app.catalog.get_my_tests("s-math").await, FetchOutcome::Updated);

    let state = ctx.app.catalog.snapshot();
    assert_eq!(state.my_tests.len(), 3);
    assert_eq!(state.my_tests_subject.as_deref(), Some("s-math"));
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_json_delayed(
            "GET",
            "/get_tests/getMytest/s-old",
            200,
            json!({ "Mytests": sample_tests(4) }),
            Duration::from_millis(400),
        )
        .await;
    backend.mock_my_tests("s-new", sample_tests(2)).await;
    let ctx = TestContext::new(&backend.uri());

    let (old, new) = futures::join!(
        ctx.app.catalog.get_my_tests("s-old"),
        ctx.app.catalog.get_my_tests("s-new"),
    );

    assert_eq!(new, FetchOutcome::Updated);
    assert_eq!(old, FetchOutcome::Discarded);

    let state = ctx.app.catalog.snapshot();
    assert_eq!(state.my_tests_subject.as_deref(), Some("s-new"));
    assert_eq!(state.my_tests.len(), 2);
    assert_eq!(state.in_flight(), 0);
}

#[tokio::test]
async fn test_loading_tracks_concurrent_requests() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_json_delayed("GET", "/api/get_tests/tests", 200, json!({ "subjects": [] }), Duration::from_millis(200))
        .await;
    backend
        .mock_json_delayed("GET", "/api/get/Statistics", 200, sample_statistics(), Duration::from_millis(200))
        .await;
    let ctx = TestContext::new(&backend.uri());
    let catalog = ctx.app.catalog.clone();

    let fetches = tokio::spawn(async move {
        futures::join!(catalog.get_subjects(), catalog.get_statistics())
    });

    tokio::time::sleep(Duration::from_millis(80)).await;
    let during = ctx.app.catalog.snapshot();
    assert!(during.is_loading());
    assert_eq!(during.in_flight(), 2);

    let (subjects, statistics) = fetches.await.unwrap();
    assert_eq!(subjects, FetchOutcome::Updated);
    assert_eq!(statistics, FetchOutcome::Updated);
    assert!(!ctx.app.catalog.snapshot().is_loading());
}

#[tokio::test]
async fn test_abandoned_fetch_does_not_stay_loading() {
    let backend = BackendMockServer::new().await;
    Mock::given(method("GET"))
        .and(path("/api/get_tests/tests"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "subjects": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    backend.mock_subjects(sample_subjects()).await;
    let ctx = TestContext::new(&backend.uri());

    let attempt = tokio::time::timeout(Duration::from_millis(50), ctx.app.catalog.get_subjects()).await;
    assert!(attempt.is_err());

    let state = ctx.app.catalog.snapshot();
    assert_eq!(state.in_flight(), 0);
    assert!(!state.is_loading());

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(!ctx.app.catalog.snapshot().is_loading());

    assert_eq!(ctx.app.catalog.get_subjects().await, FetchOutcome::Updated);
    assert!(!ctx.app.catalog.snapshot().is_loading());
    assert!(ctx.app.notifications.drain().is_empty());
}

#[tokio::test]
async fn test_get_statistics() {
    let backend = BackendMockServer::new().await;
    backend.mock_statistics(sample_statistics()).await;
    let ctx = TestContext::new(&backend.uri());

    assert_eq!(ctx.app.catalog.get_statistics().await, FetchOutcome::Updated);

    let stats = ctx.app.catalog.snapshot().statistics;
    assert_eq!(
        stats,
        Some(Statistics { subjects_count: 2, tests_count: 12, student_count: 340, teacher_count: 9 })
    );
}

#[tokio::test]
async fn test_get_test_questions_null_is_soft_failure() {
    let backend = BackendMockServer::new().await;
    backend.mock_json("GET", "/student/get/questions/t-9", 200, serde_json::Value::Null).await;
    let ctx = TestContext::new(&backend.uri());

    assert_eq!(ctx.app.catalog.get_test_questions("t-9").await, FetchOutcome::Failed);
    assert!(ctx.app.catalog.snapshot().questions.is_none());

    let toasts = ctx.app.notifications.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Test questions not found ⚠️");
}

#[tokio::test]
async fn test_get_test_questions_keeps_payload() {
    let backend = BackendMockServer::new().await;
    let questions = json!({ "title": "Algebra", "questions": [{ "text": "2 + 2?", "options": ["3", "4"] }] });
    backend.mock_json("GET", "/student/get/questions/t-1", 200, questions.clone()).await;
    let ctx = TestContext::new(&backend.uri());

    assert_eq!(ctx.app.catalog.get_test_questions("t-1").await, FetchOutcome::Updated);
    assert_eq!(ctx.app.catalog.snapshot().questions, Some(questions));
}

#[tokio::test]
async fn test_check_answers_posts_submission() {
    let backend = BackendMockServer::new().await;
    let answers = json!([{ "questionId": "q1", "answer": "4" }]);
    let verdict = json!({ "correct": 1, "total": 1 });
    backend.expect_answers("t-1", answers.clone(), verdict.clone()).await;
    let ctx = TestContext::new(&backend.uri());

    assert_eq!(ctx.app.catalog.check_answers(&answers, "t-1").await, FetchOutcome::Updated);
    assert_eq!(ctx.app.catalog.snapshot().check_result, Some(verdict));
    backend.verify().await;
}

#[tokio::test]
async fn test_get_worked_on_tests_failure_toasts() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_json("GET", "/profile/get_infos_of_profile", 401, json!({ "message": "Please log in" }))
        .await;
    let ctx = TestContext::new(&backend.uri());

    assert_eq!(ctx.app.catalog.get_worked_on_tests().await, FetchOutcome::Failed);

    let toasts = ctx.app.notifications.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Profile data not found ⚠️");
    assert_eq!(toasts[0].detail.as_deref(), Some("Please log in"));
}
