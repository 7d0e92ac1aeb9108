//! Common test utilities for integration tests.
//!
//! Provides an in-memory [`ChangelogSource`] so aggregation can be tested
//! without rpm installed.
//!
//! Note: Each integration test file compiles as a separate crate,
//! so not all helpers are used in every test file. We suppress
//! dead_code warnings at the module level.

#![allow(dead_code)]

pub mod fake_source;

pub use fake_source::{FakeEntry, FakeSource, entry};
