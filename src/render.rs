//! Total-order sort and text rendering of aggregated entries

use std::fmt::Write;

use crate::model::Entry;
use crate::rpm::constants::{plain, suse};
use crate::rpm::{FIELD_SENTINEL, NONE_VALUE};

/// Output layout for rendered entries
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// `----` separator, then `<subject> @<timestamp> <author>` and the body
    #[default]
    Plain,
    /// SUSE `.changes` layout
    Suse,
    /// The rpm field stream, one field per line
    Fields,
}

/// Sort entries ascending by `(timestamp, subject, -sequence)`
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(Entry::cmp_key);
}

/// Sort `entries` and render them most recent first
pub fn render_sorted(mut entries: Vec<Entry>, format: RenderFormat) -> String {
    sort_entries(&mut entries);
    render(&entries, format)
}

/// Render already sorted entries, walking them from the end
pub fn render(entries: &[Entry], format: RenderFormat) -> String {
    let mut out = String::new();
    for entry in entries.iter().rev() {
        match format {
            RenderFormat::Plain => write_plain(&mut out, entry),
            RenderFormat::Suse => write_suse(&mut out, entry),
            RenderFormat::Fields => write_fields(&mut out, entry),
        }
    }
    out
}

fn write_plain(out: &mut String, entry: &Entry) {
    out.push_str(plain::SEPARATOR);
    out.push('\n');
    if let Some(subject) = &entry.subject {
        out.push_str(subject);
        out.push(' ');
    }
    // Writing to a String cannot fail
    let _ = writeln!(out, "@{} {}", entry.timestamp, entry.author);
    out.push_str(&entry.body);
}

fn write_suse(out: &mut String, entry: &Entry) {
    let timestamp = entry.timestamp.to_utc().format(suse::TIMESTAMP_FORMAT);
    out.push_str(&"-".repeat(suse::HEADER_WIDTH));
    out.push('\n');
    let _ = writeln!(
        out,
        "{timestamp}{}{}",
        suse::TIMESTAMP_AUTHOR_SEPARATOR,
        entry.author
    );
    out.push_str(&entry.body);
}

fn write_fields(out: &mut String, entry: &Entry) {
    let _ = writeln!(
        out,
        "{}\n{}\n{}",
        entry
            .subject
            .as_deref()
            .filter(|subject| !subject.is_empty())
            .unwrap_or(NONE_VALUE),
        entry.timestamp.epoch_seconds(),
        entry.author
    );
    out.push_str(&entry.body);
    out.push_str(FIELD_SENTINEL);
    out.push('\n');
}
