//! Field-stream parser (rpm -q --qf with the field-stream template)

use super::super::RpmError;
use super::super::template::{FIELD_SENTINEL, NONE_VALUE};
use super::{Parser, numbered_lines, push_body_line, strip_terminator};
use crate::model::{Entry, Timestamp};

/// Parser state while scanning a field stream
enum State {
    AwaitSubject,
    AwaitTimestamp {
        subject: Option<String>,
        sequence: usize,
    },
    AwaitAuthor {
        subject: Option<String>,
        sequence: usize,
        timestamp: Timestamp,
    },
    AccumulatingBody(Entry),
}

impl Parser {
    /// Parse a field stream, handing each Entry to `emit` as soon as its
    /// record is complete
    ///
    /// Expected format (one field per line, records end with the sentinel):
    /// `<subject>\n<epoch seconds>\n<author>\n<body lines...>\n<sentinel>\n`
    ///
    /// Returns the number of entries emitted. The stream is produced by a
    /// query we control, so any deviation is an error, not noise.
    pub fn parse_field_stream<F>(output: &str, mut emit: F) -> Result<usize, RpmError>
    where
        F: FnMut(Entry),
    {
        let mut count = 0;
        let mut state = State::AwaitSubject;

        for (lineno, line) in numbered_lines(output) {
            let content = strip_terminator(line);

            state = match state {
                State::AwaitSubject if content.is_empty() => State::AwaitSubject,
                State::AwaitSubject if content == FIELD_SENTINEL => {
                    return Err(RpmError::parse(lineno, "record terminator without a record"));
                }
                State::AwaitSubject => State::AwaitTimestamp {
                    subject: Some(content.to_string()).filter(|s| s != NONE_VALUE),
                    sequence: lineno,
                },
                State::AwaitTimestamp { subject, sequence } => {
                    let timestamp = parse_epoch(content).ok_or_else(|| {
                        RpmError::parse(lineno, format!("expected epoch seconds, got {content:?}"))
                    })?;
                    State::AwaitAuthor {
                        subject,
                        sequence,
                        timestamp,
                    }
                }
                State::AwaitAuthor {
                    subject,
                    sequence,
                    timestamp,
                } => State::AccumulatingBody(Entry {
                    subject,
                    author: content.to_string(),
                    timestamp,
                    sequence,
                    body: String::new(),
                }),
                State::AccumulatingBody(entry) if content == FIELD_SENTINEL => {
                    emit(entry);
                    count += 1;
                    State::AwaitSubject
                }
                State::AccumulatingBody(mut entry) => {
                    push_body_line(&mut entry.body, line);
                    State::AccumulatingBody(entry)
                }
            };
        }

        match state {
            State::AwaitSubject => {}
            State::AccumulatingBody(entry) => {
                emit(entry);
                count += 1;
            }
            State::AwaitTimestamp { sequence, .. } | State::AwaitAuthor { sequence, .. } => {
                return Err(RpmError::parse(sequence, "truncated record"));
            }
        }

        Ok(count)
    }

    /// Parse a field stream into a list of Entries
    pub fn parse_fields(output: &str) -> Result<Vec<Entry>, RpmError> {
        let mut entries = Vec::new();
        Self::parse_field_stream(output, |entry| entries.push(entry))?;
        Ok(entries)
    }
}

fn parse_epoch(field: &str) -> Option<Timestamp> {
    field.trim().parse::<i64>().ok().and_then(Timestamp::from_epoch)
}
