//! Changelog parsers
//!
//! Turns rpm output and SUSE `.changes` files into
//! [`Entry`](crate::model::Entry) records.
//! Every parser is a line-oriented state machine over the raw text.

mod changelog;
mod date;
mod fields;
mod suse;

pub use date::parse_changelog_date;
pub use suse::{parse_suse_timestamp, read_changes_file};


use regex::Regex;
use std::sync::LazyLock;

/// Regex for a free-text changelog header
/// Format: `* <date ending in a 4-digit year> <author>`
/// Example: `* Mon Jan 01 2024 Jane Doe <jane@example.com> - 1.0-1`
///
/// Authors may contain spaces, so the date ends at the last token
/// that ends in four digits (greedy group 1).
///
/// Groups:
/// 1. date text
/// 2. author
static CHANGELOG_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\* (.*\d{4}) (.*)$").expect("Invalid changelog header regex")
});

/// Parser for changelog text
pub struct Parser;

/// Iterate the lines of `text` with 1-based line numbers, keeping terminators
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line))
}

/// A line without its `\n` / `\r\n` terminator
fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Append a body line, making sure it ends with `\n`
fn push_body_line(body: &mut String, line: &str) {
    body.push_str(line);
    if !line.ends_with('\n') {
        body.push('\n');
    }
}
