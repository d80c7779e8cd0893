//! Fixture payloads shaped like the Registon backend's responses

use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};

pub fn sample_user() -> Value {
    json!({
        "_id": "u-100",
        "name": "Aziza Karimova",
        "email": "aziza@example.uz",
        "role": "student",
        "ID": false
    })
}

pub fn sample_subjects() -> Value {
    json!([
        {
            "_id": "s-math",
            "name": "Mathematics",
            "description": "Algebra, geometry and calculus practice tests",
            "imageUrl": "https://cdn.example.uz/math.png"
        },
        {
            "_id": "s-eng",
            "name": "English",
            "description": "Grammar and reading",
            "imageUrl": "https://cdn.example.uz/english.png"
        }
    ])
}

pub fn sample_statistics() -> Value {
    json!({
        "SubjectsCount": 2,
        "TestsCount": 12,
        "StudentCount": 340,
        "TeacherCount": 9
    })
}

/// `count` tests, `t-1` oldest and `t-{count}` newest, one day apart
pub fn sample_tests(count: usize) -> Value {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let tests: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "_id": format!("t-{}", i),
                "title": format!("Test {}", i),
                "createdAt": (start + Duration::days(i as i64)).to_rfc3339(),
                "questionsMassive": vec![json!({"q": i}); i % 4 + 1]
            })
        })
        .collect();
    Value::Array(tests)
}
