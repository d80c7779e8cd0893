//! Home screen: subject catalog and platform statistics

use std::sync::Arc;
use crate::models::{Statistics, Subject};
use crate::services::notification::{Notifier, Toast};
use crate::state::{CatalogState, CatalogStore, FetchOutcome};
use crate::utils::helpers::truncate_text;
use super::navigation::{Navigator, Route};

const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// Contact link shown in the home screen footer
pub const TELEGRAM_URL: &str = "https://t.me/Registan_LC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Subject> for SubjectCard {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id.clone(),
            name: subject.name.clone(),
            description: truncate_text(&subject.description, DESCRIPTION_PREVIEW_CHARS),
            image_url: subject.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub loading: bool,
    pub subjects: Vec<SubjectCard>,
    pub statistics: Option<Statistics>,
}

pub struct HomeScreen {
    catalog: Arc<CatalogStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl HomeScreen {
    pub fn new(catalog: Arc<CatalogStore>, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self { catalog, notifier, navigator }
    }

    /// Fetch subjects and statistics side by side
    pub async fn mount(&self) -> (FetchOutcome, FetchOutcome) {
        futures::join!(self.catalog.get_subjects(), self.catalog.get_statistics())
    }

    pub fn view(state: &CatalogState) -> HomeView {
        HomeView {
            loading: state.is_loading(),
            subjects: state.subjects.iter().map(SubjectCard::from).collect(),
            statistics: state.statistics,
        }
    }

    pub fn select_subject(&self, subject: &SubjectCard) {
        self.notifier.show(
            Toast::info(format!("{} selected", subject.name)).with_detail("Loading tests..."),
        );
        self.navigator.navigate(Route::Subject {
            id: subject.id.clone(),
            name: subject.name.clone(),
        });
    }
}
