//! Subject model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

/// Body of `GET /api/get_tests/tests`
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectsEnvelope {
    pub subjects: Option<Vec<Subject>>,
    pub message: Option<String>,
}
