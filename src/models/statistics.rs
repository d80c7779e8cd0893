//! Platform statistics model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statistics {
    #[serde(default)]
    pub subjects_count: u64,
    #[serde(default)]
    pub tests_count: u64,
    #[serde(default)]
    pub student_count: u64,
    #[serde(default)]
    pub teacher_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_wire_names() {
        let json = r#"{"SubjectsCount":4,"TestsCount":120,"StudentCount":950,"TeacherCount":12}"#;
        let stats: Statistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.subjects_count, 4);
        assert_eq!(stats.teacher_count, 12);
    }
}
