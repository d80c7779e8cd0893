//! Data models module
//!
//! This module contains the wire types exchanged with the Registon backend

pub mod user;
pub mod subject;
pub mod statistics;

// Re-export commonly used models
pub use user::{User, LoginRequest, SignupRequest};
pub use subject::{Subject, SubjectsEnvelope};
pub use test::{Test, MyTestsEnvelope, AnswerSubmission};
pub use statistics::Statistics;
