//! Per-package fetch and fan-out aggregation
//!
//! Fetches every package's changelog through a [`ChangelogSource`], parses
//! it and merges all entries into one unsorted collection. Concurrent runs
//! produce the same entries as sequential ones; only the interleaving of
//! progress markers differs.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use crate::config::{AggregateOptions, FailurePolicy, QueryMode};
use crate::model::Entry;
use crate::rpm::{ChangelogSource, Parser, RpmError};

/// Result of an aggregation run
#[derive(Debug, Default)]
pub struct Aggregate {
    /// Entries of every package, in no particular order
    pub entries: Vec<Entry>,
    /// Number of packages processed (including failed ones)
    pub packages: usize,
    /// Packages whose fetch failed and were skipped
    pub failed: Vec<String>,
}

/// Fetch one package's changelog and parse it according to `mode`
///
/// In text mode the package identifier becomes the subject; in field mode
/// the subject comes from the stream itself, which carries the same
/// NVRA identifier `rpm -qa` lists, so both modes agree.
pub fn fetch_entries<S>(source: &S, package: &str, mode: QueryMode) -> Result<Vec<Entry>, RpmError>
where
    S: ChangelogSource + ?Sized,
{
    let output = source.fetch(package, mode)?;
    let entries = match mode {
        QueryMode::Text => Parser::parse_changelog(&output, Some(package)),
        QueryMode::Fields => Parser::parse_fields(&output)?,
    };
    tracing::debug!(package, entries = entries.len(), "fetched changelog");
    Ok(entries)
}

/// Fetch and parse the changelogs of `packages`, merging all entries
///
/// Structural parse errors always abort the run. Fetch failures abort it
/// only under [`FailurePolicy::Abort`]; otherwise the package is recorded
/// in [`Aggregate::failed`] and contributes no entries.
pub fn aggregate<S>(
    source: &S,
    packages: &[String],
    options: &AggregateOptions,
) -> Result<Aggregate, RpmError>
where
    S: ChangelogSource + ?Sized,
{
    let progress = Progress::new(options.progress);

    let result = if options.parallel && packages.len() > 1 {
        aggregate_concurrent(source, packages, options, &progress)
    } else {
        aggregate_sequential(source, packages, options, &progress)
    };
    progress.finish();

    let aggregate = result?;
    tracing::info!(
        packages = aggregate.packages,
        entries = aggregate.entries.len(),
        failed = aggregate.failed.len(),
        "aggregation finished"
    );
    Ok(aggregate)
}

fn aggregate_sequential<S>(
    source: &S,
    packages: &[String],
    options: &AggregateOptions,
    progress: &Progress,
) -> Result<Aggregate, RpmError>
where
    S: ChangelogSource + ?Sized,
{
    let mut aggregate = Aggregate {
        packages: packages.len(),
        ..Default::default()
    };

    for package in packages {
        let result = fetch_entries(source, package, options.mode);
        progress.tick();
        match result {
            Ok(batch) => aggregate.entries.extend(batch),
            Err(err) => settle_failure(package, err, options.failure_policy, &mut aggregate.failed)?,
        }
    }

    Ok(aggregate)
}

/// Results shared between workers, guarded by one lock
#[derive(Default)]
struct Collected {
    entries: Vec<Entry>,
    errors: Vec<(usize, RpmError)>,
}

fn aggregate_concurrent<S>(
    source: &S,
    packages: &[String],
    options: &AggregateOptions,
    progress: &Progress,
) -> Result<Aggregate, RpmError>
where
    S: ChangelogSource + ?Sized,
{
    let workers = options.jobs.clamp(1, packages.len());
    let cursor = AtomicUsize::new(0);
    let collected = Mutex::new(Collected::default());

    tracing::debug!(workers, packages = packages.len(), "starting concurrent fetch");

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(package) = packages.get(index) else {
                        break;
                    };

                    // Fetch and parse outside the lock
                    let result = fetch_entries(source, package, options.mode);
                    progress.tick();

                    let mut collected = collected.lock().unwrap_or_else(PoisonError::into_inner);
                    match result {
                        Ok(batch) => collected.entries.extend(batch),
                        Err(err) => collected.errors.push((index, err)),
                    }
                }
            });
        }
    });

    let Collected { entries, mut errors } =
        collected.into_inner().unwrap_or_else(PoisonError::into_inner);

    // Settle failures in package order so the outcome matches a sequential run
    errors.sort_by_key(|(index, _)| *index);
    let mut failed = Vec::new();
    for (index, err) in errors {
        settle_failure(&packages[index], err, options.failure_policy, &mut failed)?;
    }

    Ok(Aggregate {
        entries,
        packages: packages.len(),
        failed,
    })
}

/// Decide whether a package failure ends the run or is skipped
fn settle_failure(
    package: &str,
    err: RpmError,
    policy: FailurePolicy,
    failed: &mut Vec<String>,
) -> Result<(), RpmError> {
    if !err.is_fetch_failure() || policy == FailurePolicy::Abort {
        tracing::error!(package, error = %err, "changelog failed");
        return Err(err);
    }
    tracing::warn!(package, error = %err, "skipping package");
    failed.push(package.to_string());
    Ok(())
}

/// Liveness markers on stderr, one per completed package
struct Progress {
    enabled: bool,
}

impl Progress {
    fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn tick(&self) {
        if self.enabled {
            let mut stderr = io::stderr().lock();
            // Progress output is best effort
            let _ = stderr.write_all(b".");
            let _ = stderr.flush();
        }
    }

    fn finish(&self) {
        if self.enabled {
            let _ = writeln!(io::stderr());
        }
    }
}
