//! Data models for changelog-aggregator
//!
//! This module contains format-independent data structures shared by the
//! parsers, the aggregator and the renderer.

mod entry;
mod timestamp;

pub use entry::Entry;
pub use timestamp::Timestamp;
