//! Test helpers module
//!
//! Mock backend, fixture data and a ready-made application context for the
//! integration tests.

#![allow(dead_code)]

pub mod backend_mock;
pub mod test_context;
pub mod test_data;

pub use backend_mock::*;
pub use test_context::*;
pub use test_data::*;
