//! FakeSource helper for aggregation tests.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use changelog_aggregator::config::QueryMode;
use changelog_aggregator::rpm::{ChangelogSource, FIELD_SENTINEL, RpmError};

/// One changelog entry as the fake rpm would print it
#[derive(Debug, Clone)]
pub struct FakeEntry {
    pub date: &'static str,
    pub epoch: i64,
    pub author: &'static str,
    pub body: &'static str,
}

pub fn entry(date: &'static str, epoch: i64, author: &'static str, body: &'static str) -> FakeEntry {
    FakeEntry {
        date,
        epoch,
        author,
        body,
    }
}

/// An in-memory package database.
///
/// Packages not registered fail like `rpm -q` on a missing package.
#[derive(Debug, Default)]
pub struct FakeSource {
    packages: BTreeMap<String, Vec<FakeEntry>>,
    /// Per-fetch delay so concurrent workers finish out of order
    jitter: bool,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package with its entries, newest first.
    pub fn with_package(mut self, name: &str, entries: Vec<FakeEntry>) -> Self {
        self.packages.insert(name.to_string(), entries);
        self
    }

    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    /// `rpm -q --changelog` style output
    pub fn text_output(entries: &[FakeEntry]) -> String {
        entries
            .iter()
            .map(|e| format!("* {} {}\n{}\n", e.date, e.author, e.body))
            .collect()
    }

    /// Field-stream output
    pub fn field_output(name: &str, entries: &[FakeEntry]) -> String {
        entries
            .iter()
            .map(|e| format!("{name}\n{}\n{}\n{}{FIELD_SENTINEL}\n", e.epoch, e.author, e.body))
            .collect()
    }

    /// Three packages, two entries each, with same-day ties
    pub fn three_packages() -> Self {
        Self::new()
            .with_package(
                "bash",
                vec![
                    entry(
                        "Tue Jan 02 2024",
                        1_704_196_800,
                        "Jane Doe <jane@example.com>",
                        "- Fixed bug.\n",
                    ),
                    entry(
                        "Mon Jan 01 2024",
                        1_704_110_400,
                        "Jane Doe <jane@example.com>",
                        "- Rebuilt.\n",
                    ),
                ],
            )
            .with_package(
                "coreutils",
                vec![
                    entry(
                        "Tue Jan 02 2024",
                        1_704_196_800,
                        "Joe Bloggs <joe@example.com>",
                        "- New upstream.\n",
                    ),
                    entry(
                        "Fri Dec 01 2023",
                        1_701_432_000,
                        "Joe Bloggs <joe@example.com>",
                        "- Initial.\n",
                    ),
                ],
            )
            .with_package(
                "zsh",
                vec![
                    entry(
                        "Wed Jan 03 2024",
                        1_704_283_200,
                        "Alice <alice@example.com>",
                        "- Security fix.\n",
                    ),
                    entry(
                        "Wed Jan 03 2024",
                        1_704_283_200,
                        "Alice <alice@example.com>",
                        "- Same day, older.\n",
                    ),
                ],
            )
    }

    pub fn package_names(&self) -> Vec<String> {
        self.packages.keys().cloned().collect()
    }
}

impl ChangelogSource for FakeSource {
    fn list_packages(&self, filter: &[String]) -> Result<Vec<String>, RpmError> {
        Ok(self
            .packages
            .keys()
            .filter(|name| filter.is_empty() || filter.contains(*name))
            .cloned()
            .collect())
    }

    fn fetch(&self, package: &str, mode: QueryMode) -> Result<String, RpmError> {
        if self.jitter {
            let delay = package.bytes().map(u64::from).sum::<u64>() % 7;
            thread::sleep(Duration::from_millis(delay));
        }

        let entries = self
            .packages
            .get(package)
            .ok_or_else(|| RpmError::CommandFailed {
                stderr: format!("package {package} is not installed"),
                exit_code: 1,
            })?;

        Ok(match mode {
            QueryMode::Text => Self::text_output(entries),
            QueryMode::Fields => Self::field_output(package, entries),
        })
    }
}
