//! Free-text changelog parser (rpm -q --changelog)

use chrono::{Local, NaiveDate};

use super::date::parse_changelog_date;
use super::{CHANGELOG_HEADER_REGEX, Parser, numbered_lines, push_body_line, strip_terminator};
use crate::model::{Entry, Timestamp};

/// Parser state while scanning a free-text changelog
enum State {
    /// Nothing seen yet; lines are discarded
    AwaitHeader,
    /// Collecting body lines for the entry under construction
    AccumulatingBody(Entry),
}

impl Parser {
    /// Parse `rpm -q --changelog` output into a list of Entries
    ///
    /// Expected format:
    /// ```text
    /// * Mon Jan 01 2024 Jane Doe <jane@example.com> - 1.0-2
    /// - Fixed bug.
    ///
    /// * Sun Dec 31 2023 Joe Bloggs <joe@example.com> - 1.0-1
    /// - Initial package.
    /// ```
    ///
    /// Never fails: a header whose date cannot be recovered gets today's
    /// date and a warning is logged.
    pub fn parse_changelog(output: &str, subject: Option<&str>) -> Vec<Entry> {
        Self::parse_changelog_with_fallback(output, subject, Local::now().date_naive())
    }

    /// Like [`Parser::parse_changelog`] with an explicit fallback date
    pub fn parse_changelog_with_fallback(
        output: &str,
        subject: Option<&str>,
        fallback: NaiveDate,
    ) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut state = State::AwaitHeader;

        for (lineno, line) in numbered_lines(output) {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = CHANGELOG_HEADER_REGEX.captures(strip_terminator(line)) {
                if let State::AccumulatingBody(entry) = state {
                    entries.push(entry);
                }

                let date_text = &caps[1];
                let date = parse_changelog_date(date_text).unwrap_or_else(|| {
                    tracing::warn!(
                        subject = subject.unwrap_or_default(),
                        line = lineno,
                        header = strip_terminator(line),
                        "unparsable changelog date, using {fallback}"
                    );
                    fallback
                });

                state = State::AccumulatingBody(Entry {
                    subject: subject.map(str::to_string),
                    author: caps[2].trim_end().to_string(),
                    timestamp: Timestamp::Date(date),
                    sequence: lineno,
                    body: String::new(),
                });
            } else if let State::AccumulatingBody(ref mut entry) = state {
                push_body_line(&mut entry.body, line);
            }
        }

        if let State::AccumulatingBody(entry) = state {
            entries.push(entry);
        }

        entries
    }
}
