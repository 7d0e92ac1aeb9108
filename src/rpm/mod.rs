//! rpm command execution layer
//!
//! This module handles running rpm queries and parsing their output.

pub mod constants;
mod executor;
/// Parser module (public for integration testing)
pub mod parser;
mod template;

pub use executor::{ChangelogSource, RpmExecutor};
pub use parser::{Parser, read_changes_file};
pub use template::{FIELD_SENTINEL, NONE_VALUE, Templates};

use std::io;
use thiserror::Error;

/// Errors that can occur when querying rpm or parsing changelogs
#[derive(Error, Debug)]
pub enum RpmError {
    #[error("rpm command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("Failed to parse changelog at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("rpm is not installed or not in PATH")]
    RpmNotFound,
}

impl RpmError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// True when the error came from invoking rpm rather than from the
    /// structure of its output
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_not_fetch_failure() {
        assert!(!RpmError::parse(3, "bad epoch").is_fetch_failure());
        assert!(RpmError::RpmNotFound.is_fetch_failure());
        assert!(
            RpmError::CommandFailed {
                stderr: "package foo is not installed".to_string(),
                exit_code: 1,
            }
            .is_fetch_failure()
        );
    }

    #[test]
    fn test_parse_error_message_names_line() {
        let err = RpmError::parse(7, "expected epoch seconds");
        assert_eq!(
            err.to_string(),
            "Failed to parse changelog at line 7: expected epoch seconds"
        );
    }
}
