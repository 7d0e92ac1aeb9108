//! SUSE `.changes` parser
//!
//! ```text
//! -------------------------------------------------------------------
//! Mon Jan  1 12:00:00 UTC 2024 - jane@example.com
//!
//! - Update to 1.2.3
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use super::super::RpmError;
use super::super::constants::suse;
use super::{Parser, numbered_lines, push_body_line, strip_terminator};
use crate::model::{Entry, Timestamp};

/// Parser state while scanning a `.changes` file
enum State {
    AwaitHeader,
    AwaitTimestampAuthor,
    AccumulatingBody(Entry),
}

impl Parser {
    /// Parse the contents of a SUSE `.changes` file into a list of Entries
    ///
    /// The file is maintained by hand through `osc vc`, so it is treated as
    /// authoritative: any line out of place is an error.
    pub fn parse_suse_changes(output: &str, subject: Option<&str>) -> Result<Vec<Entry>, RpmError> {
        let mut entries = Vec::new();
        let mut state = State::AwaitHeader;
        let mut last_header = 0;

        for (lineno, line) in numbered_lines(output) {
            let content = strip_terminator(line);

            state = match state {
                State::AwaitHeader if is_header(content) => {
                    last_header = lineno;
                    State::AwaitTimestampAuthor
                }
                State::AwaitHeader => {
                    return Err(RpmError::parse(
                        lineno,
                        format!("garbage before first header: {content:?}"),
                    ));
                }
                State::AwaitTimestampAuthor => {
                    let (timestamp, author) = parse_timestamp_author(lineno, content)?;
                    State::AccumulatingBody(Entry {
                        subject: subject.map(str::to_string),
                        author,
                        timestamp,
                        sequence: lineno,
                        body: String::new(),
                    })
                }
                State::AccumulatingBody(entry) if is_header(content) => {
                    entries.push(entry);
                    last_header = lineno;
                    State::AwaitTimestampAuthor
                }
                State::AccumulatingBody(mut entry) => {
                    push_body_line(&mut entry.body, line);
                    State::AccumulatingBody(entry)
                }
            };
        }

        match state {
            State::AwaitHeader => {}
            State::AccumulatingBody(entry) => entries.push(entry),
            State::AwaitTimestampAuthor => {
                return Err(RpmError::parse(last_header, "header without an entry"));
            }
        }

        Ok(entries)
    }
}

/// Read a `.changes` file, using its file stem as the subject
pub fn read_changes_file(path: &Path) -> Result<Vec<Entry>, RpmError> {
    let content = fs::read_to_string(path)?;
    let subject = path.file_stem().map(|stem| stem.to_string_lossy());
    Parser::parse_suse_changes(&content, subject.as_deref())
}

fn is_header(line: &str) -> bool {
    line.len() == suse::HEADER_WIDTH && line.bytes().all(|b| b == b'-')
}

/// Split `TIMESTAMP - AUTHOR` on the first separator
fn parse_timestamp_author(lineno: usize, line: &str) -> Result<(Timestamp, String), RpmError> {
    let (timestamp, author) = line
        .split_once(suse::TIMESTAMP_AUTHOR_SEPARATOR)
        .ok_or_else(|| {
            RpmError::parse(lineno, format!("not in 'TIMESTAMP - AUTHOR' format: {line:?}"))
        })?;

    let timestamp = parse_suse_timestamp(timestamp).ok_or_else(|| {
        RpmError::parse(lineno, format!("unparsable timestamp: {timestamp:?}"))
    })?;

    Ok((Timestamp::Instant(timestamp), author.to_string()))
}

/// Parse `date(1)` default output: `Mon Jan  1 12:00:00 UTC 2024`
///
/// The weekday is not checked against the date; hand-edited files get it
/// wrong. The zone may be a known abbreviation, a numeric offset or missing
/// (UTC). An unknown abbreviation is read as UTC with a warning.
pub fn parse_suse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let (fields, offset) = match tokens.as_slice() {
        [_weekday, month, day, time, zone, year] => {
            ([*month, *day, *time, *year], zone_offset(zone)?)
        }
        [_weekday, month, day, time, year] => {
            ([*month, *day, *time, *year], FixedOffset::east_opt(0)?)
        }
        _ => return None,
    };

    let naive = NaiveDateTime::parse_from_str(&fields.join(" "), "%b %d %H:%M:%S %Y").ok()?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// UTC offset for a zone abbreviation or a `+hhmm` / `-hhmm` offset
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    let hours = match zone {
        "UTC" | "GMT" | "UT" | "Z" | "WET" => 0,
        "WEST" | "CET" | "BST" => 1,
        "CEST" | "EET" => 2,
        "EEST" | "MSK" => 3,
        "HKT" | "SGT" => 8,
        "JST" | "KST" => 9,
        "AEST" => 10,
        "AEDT" => 11,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ if zone.bytes().all(|b| b.is_ascii_alphabetic()) => {
            tracing::warn!(zone, "unknown time zone abbreviation, assuming UTC");
            0
        }
        _ => return parse_numeric_offset(zone),
    };
    FixedOffset::east_opt(hours * 3600)
}

fn parse_numeric_offset(zone: &str) -> Option<FixedOffset> {
    let (sign, digits) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
