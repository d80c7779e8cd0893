//! State management module
//!
//! This module holds the client's state containers: the session store and
//! the catalog store

pub mod catalog;
pub mod sequence;
pub mod session;

// Re-export commonly used state components
pub use catalog::{CatalogSlice, CatalogState, CatalogStore, FetchOutcome};
pub use sequence::{RequestSequencer, SequenceMark};
pub use session::{SessionState, SessionStore, MIN_PASSWORD_LENGTH};
