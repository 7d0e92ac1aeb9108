//! changelog-aggregator - merge package changelogs into one timeline
//!
//! Collects the changelogs of installed RPM packages (or SUSE `.changes`
//! files), parses them into uniform entries and renders them most recent
//! first.
//!
//! This library provides:
//! - [`aggregate`]: Per-package fetch and sequential/concurrent fan-out
//! - [`cli`]: Command-line definitions
//! - [`config`]: Run options
//! - [`model`]: Domain models
//! - [`render`]: Sorting and output formats
//! - [`rpm`]: rpm command execution and changelog parsing

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod model;
pub mod render;
pub mod rpm;
