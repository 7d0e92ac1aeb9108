//! SUSE .changes file input tests.

use std::fs;

use tempfile::TempDir;

use changelog_aggregator::render::{RenderFormat, render_sorted};
use changelog_aggregator::rpm::{RpmError, read_changes_file};

fn header() -> String {
    "-".repeat(67)
}

fn sample_changes() -> String {
    let header = header();
    format!(
        "{header}\n\
         Tue Jan  2 09:15:00 UTC 2024 - jane@example.com\n\
         \n\
         - Update to version 1.2.3:\n  \
           * fix crash on empty input\n\
         \n\
         {header}\n\
         Mon Jan  1 12:00:00 UTC 2024 - joe@example.com\n\
         \n\
         - Initial package\n\
         \n"
    )
}

#[test]
fn test_read_changes_file_uses_file_stem() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("libfoo.changes");
    fs::write(&path, sample_changes()).unwrap();

    let entries = read_changes_file(&path).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(
        entries
            .iter()
            .all(|entry| entry.subject.as_deref() == Some("libfoo"))
    );
    assert_eq!(entries[0].author, "jane@example.com");
    assert_eq!(
        entries[0].body,
        "\n- Update to version 1.2.3:\n  * fix crash on empty input\n\n"
    );
}

#[test]
fn test_changes_file_round_trips_through_suse_format() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("foo.changes");
    fs::write(&path, sample_changes()).unwrap();

    let entries = read_changes_file(&path).unwrap();
    assert_eq!(render_sorted(entries, RenderFormat::Suse), sample_changes());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let err = read_changes_file(&dir.path().join("nope.changes")).unwrap_err();
    assert!(matches!(err, RpmError::Io(_)));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("bad.changes");
    fs::write(&path, format!("{}\nno separator here\n", header())).unwrap();

    let err = read_changes_file(&path).unwrap_err();
    assert!(matches!(err, RpmError::Parse { line: 2, .. }));
}
