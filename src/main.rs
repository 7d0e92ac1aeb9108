//! changelog-aggregator
//!
//! Binary entry point: parses flags, runs the aggregation and prints the
//! merged changelog.

use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::WrapErr;

use changelog_aggregator::aggregate::{Aggregate, aggregate};
use changelog_aggregator::cli::Cli;
use changelog_aggregator::render::render_sorted;
use changelog_aggregator::rpm::{ChangelogSource, RpmExecutor, read_changes_file};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cli.log_level())
        .init();

    let result = run(&cli);
    if let Err(ref e) = result {
        tracing::error!(error = %e, "run aborted");
    }
    result
}

/// Collect, sort and print the changelog
fn run(cli: &Cli) -> color_eyre::Result<()> {
    let collected = if cli.changes.is_empty() {
        collect_installed(cli)?
    } else {
        collect_changes_files(cli)?
    };

    eprintln!("{} changes", collected.entries.len());
    if !collected.failed.is_empty() {
        eprintln!("{} packages skipped", collected.failed.len());
    }

    // Render fully before writing so stdout gets all or nothing
    let output = render_sorted(collected.entries, cli.format);
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Query rpm for every package matching the filter
fn collect_installed(cli: &Cli) -> color_eyre::Result<Aggregate> {
    let executor = match cli.root {
        Some(ref root) => RpmExecutor::with_root(root.as_str()),
        None => RpmExecutor::new(),
    };

    let patterns = cli.patterns();
    let packages = executor
        .list_packages(&patterns)
        .wrap_err("failed to list installed packages")?;
    eprintln!("{} packages", packages.len());

    aggregate(&executor, &packages, &cli.options()).wrap_err("failed to aggregate changelogs")
}

/// Parse the given `.changes` files
fn collect_changes_files(cli: &Cli) -> color_eyre::Result<Aggregate> {
    let mut collected = Aggregate {
        packages: cli.changes.len(),
        ..Default::default()
    };
    eprintln!("{} packages", collected.packages);

    for path in &cli.changes {
        let entries = read_changes_file(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "parsed changes file");
        collected.entries.extend(entries);
    }

    Ok(collected)
}
