//! Catalog store
//!
//! Subjects, per-subject tests, questions, answer checks, statistics and the
//! profile history. Each action is an independent fetch that either replaces
//! its slice or leaves it alone and raises one error toast.

use std::future::Future;
use std::sync::Arc;
use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;
use crate::models::{AnswerSubmission, MyTestsEnvelope, Statistics, Subject, SubjectsEnvelope, Test};
use crate::services::api::{decode_body, endpoints, require_payload, ApiClient};
use crate::services::notification::{Notifier, Toast};
use crate::utils::errors::{ApiError, ApiResult, RegistonError};
use crate::utils::logging::log_store_failure;
use super::sequence::{RequestSequencer, SequenceMark};

/// Independently fetched parts of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSlice {
    Subjects,
    MyTests,
    Questions,
    Statistics,
    CheckResult,
    WorkedOn,
}

impl CatalogSlice {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        match self {
            CatalogSlice::Subjects => 0,
            CatalogSlice::MyTests => 1,
            CatalogSlice::Questions => 2,
            CatalogSlice::Statistics => 3,
            CatalogSlice::CheckResult => 4,
            CatalogSlice::WorkedOn => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogSlice::Subjects => "subjects",
            CatalogSlice::MyTests => "my_tests",
            CatalogSlice::Questions => "questions",
            CatalogSlice::Statistics => "statistics",
            CatalogSlice::CheckResult => "check_result",
            CatalogSlice::WorkedOn => "worked_on",
        }
    }

    /// Title of the toast raised when fetching this slice fails
    pub fn failure_title(self) -> &'static str {
        match self {
            CatalogSlice::Subjects => "Could not load subjects ⚠️",
            CatalogSlice::MyTests => "Tests not found ⚠️",
            CatalogSlice::Questions => "Test questions not found ⚠️",
            CatalogSlice::Statistics => "Statistics not available ⚠️",
            CatalogSlice::CheckResult => "Could not check your answers ⚠️",
            CatalogSlice::WorkedOn => "Profile data not found ⚠️",
        }
    }
}

/// What became of one catalog action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The slice now holds the response
    Updated,
    /// A newer response had already been applied; this one was dropped
    Discarded,
    /// The request failed and a toast was raised
    Failed,
}

/// Snapshot of the catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub subjects: Vec<Subject>,
    pub statistics: Option<Statistics>,
    pub my_tests: Vec<Test>,
    /// Subject the `my_tests` slice was fetched for
    pub my_tests_subject: Option<String>,
    pub questions: Option<Value>,
    pub check_result: Option<Value>,
    pub worked_on: Option<Value>,
    in_flight: usize,
    marks: [SequenceMark; CatalogSlice::COUNT],
}

impl CatalogState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// Catalog store backed by the Registon test endpoints
pub struct CatalogStore {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    sequencer: RequestSequencer,
    state: watch::Sender<CatalogState>,
}

impl CatalogStore {
    /// Create a new, empty CatalogStore
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            api,
            notifier,
            sequencer: RequestSequencer::new(),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Fetch the subject list
    pub async fn get_subjects(&self) -> FetchOutcome {
        let fetch = async {
            let body = self.api.get_json(endpoints::SUBJECTS).await?;
            let envelope: SubjectsEnvelope = decode_body(body)?;
            envelope.subjects.ok_or(ApiError::MissingPayload {
                field: "subjects",
                message: envelope.message,
            })
        };

        self.run(CatalogSlice::Subjects, fetch, |s, subjects| s.subjects = subjects).await
    }

    /// Fetch every test of one subject
    pub async fn get_my_tests(&self, subject_id: &str) -> FetchOutcome {
        let fetch = async {
            let body = self.api.get_json(&endpoints::subject_tests(subject_id)).await?;
            let envelope: MyTestsEnvelope = decode_body(body)?;
            envelope.tests.ok_or(ApiError::MissingPayload {
                field: "Mytests",
                message: envelope.message,
            })
        };

        let subject_id = subject_id.to_string();
        self.run(CatalogSlice::MyTests, fetch, move |s, tests| {
            s.my_tests = tests;
            s.my_tests_subject = Some(subject_id);
        })
        .await
    }

    /// Fetch the questions of one test
    pub async fn get_test_questions(&self, test_id: &str) -> FetchOutcome {
        let fetch = async {
            let body = self.api.get_json(&endpoints::test_questions(test_id)).await?;
            require_payload(body, "questions")
        };

        self.run(CatalogSlice::Questions, fetch, |s, questions| s.questions = Some(questions)).await
    }

    /// Fetch the platform statistics
    pub async fn get_statistics(&self) -> FetchOutcome {
        let fetch = async {
            let body = self.api.get_json(endpoints::STATISTICS).await?;
            let body = require_payload(body, "statistics")?;
            decode_body::<Statistics>(body)
        };

        self.run(CatalogSlice::Statistics, fetch, |s, stats| s.statistics = Some(stats)).await
    }

    /// Submit answers for one test and keep the backend's verdict
    pub async fn check_answers(&self, answers: &Value, test_id: &str) -> FetchOutcome {
        let fetch = async {
            let submission = AnswerSubmission { answers };
            let body = self.api.post_json(&endpoints::check_answers(test_id), &submission).await?;
            require_payload(body, "result")
        };

        self.run(CatalogSlice::CheckResult, fetch, |s, result| s.check_result = Some(result)).await
    }

    /// Fetch the tests the signed-in user has worked on
    pub async fn get_worked_on_tests(&self) -> FetchOutcome {
        let fetch = async {
            let body = self.api.get_json(endpoints::PROFILE_HISTORY).await?;
            require_payload(body, "profile")
        };

        self.run(CatalogSlice::WorkedOn, fetch, |s, history| s.worked_on = Some(history)).await
    }

    async fn run<T, Fut, F>(&self, slice: CatalogSlice, fetch: Fut, apply: F) -> FetchOutcome
    where
        Fut: Future<Output = ApiResult<T>>,
        F: FnOnce(&mut CatalogState, T),
    {
        let seq = self.sequencer.issue();
        let request = InFlight::enter(&self.state);

        match fetch.await {
            Ok(value) => {
                let mut applied = false;
                request.finish(|s| {
                    if s.marks[slice.index()].admit(seq) {
                        apply(s, value);
                        applied = true;
                    }
                });

                if applied {
                    debug!(slice = slice.as_str(), seq = seq, "Catalog slice updated");
                    FetchOutcome::Updated
                } else {
                    debug!(slice = slice.as_str(), seq = seq, "Discarded stale catalog response");
                    FetchOutcome::Discarded
                }
            }
            Err(e) => {
                request.finish(|_| {});

                let err = RegistonError::from(e);
                log_store_failure("catalog", slice.as_str(), &err);
                self.notifier.show(Toast::error(slice.failure_title()).with_detail(err.user_message()));
                FetchOutcome::Failed
            }
        }
    }
}

/// One counted in-flight request
///
/// The count is released exactly once: by `finish`, together with the
/// response, or on drop when the action future is abandoned mid-request.
struct InFlight<'a> {
    state: &'a watch::Sender<CatalogState>,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn enter(state: &'a watch::Sender<CatalogState>) -> Self {
        state.send_modify(|s| s.in_flight += 1);
        Self { state, finished: false }
    }

    fn finish(mut self, update: impl FnOnce(&mut CatalogState)) {
        self.finished = true;
        self.state.send_modify(|s| {
            s.in_flight = s.in_flight.saturating_sub(1);
            update(s);
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("Catalog request abandoned");
            self.state.send_modify(|s| s.in_flight = s.in_flight.saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_indices_are_distinct() {
        let slices = [
            CatalogSlice::Subjects,
            CatalogSlice::MyTests,
            CatalogSlice::Questions,
            CatalogSlice::Statistics,
            CatalogSlice::CheckResult,
            CatalogSlice::WorkedOn,
        ];
        let mut indices: Vec<_> = slices.iter().map(|s| s.index()).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), CatalogSlice::COUNT);
        assert!(indices.iter().all(|&i| i < CatalogSlice::COUNT));
    }

    #[test]
    fn test_abandoned_request_releases_in_flight() {
        let (state, _) = watch::channel(CatalogState::default());
        let first = InFlight::enter(&state);
        let second = InFlight::enter(&state);
        assert_eq!(state.borrow().in_flight(), 2);

        drop(first);
        assert_eq!(state.borrow().in_flight(), 1);

        second.finish(|s| s.subjects.clear());
        assert!(!state.borrow().is_loading());
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = CatalogState::default();
        assert!(!state.is_loading());
        assert!(state.subjects.is_empty());
        assert!(state.statistics.is_none());
    }
}
