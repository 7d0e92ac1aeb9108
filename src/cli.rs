//! Command-line interface definitions

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AggregateOptions, FailurePolicy, Preset, QueryMode};
use crate::render::RenderFormat;

/// Aggregate installed package changelogs into one reverse-chronological log
#[derive(Parser, Debug)]
#[command(name = "changelog-aggregator", version, about)]
pub struct Cli {
    /// Package name patterns passed to `rpm -qa` (all packages when empty)
    #[arg(value_name = "FILTER")]
    pub filter: Vec<String>,

    /// Add the patterns of a named preset to the filter
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Fetch packages one at a time
    #[arg(short, long)]
    pub sequential: bool,

    /// Maximum number of concurrent rpm queries (default: number of CPUs)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// How changelogs are requested from rpm
    #[arg(short = 'm', long, value_enum, default_value_t = QueryMode::Text)]
    pub query_mode: QueryMode,

    /// Output layout
    #[arg(short, long, value_enum, default_value_t = RenderFormat::Plain)]
    pub format: RenderFormat,

    /// Abort on the first package whose changelog cannot be fetched
    #[arg(long)]
    pub strict: bool,

    /// Read SUSE .changes files instead of querying rpm
    #[arg(short, long = "changes", value_name = "FILE")]
    pub changes: Vec<PathBuf>,

    /// Use an alternate rpm installation root
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Do not print progress markers
    #[arg(long)]
    pub no_progress: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// rpm name patterns from positional filters and the preset
    pub fn patterns(&self) -> Vec<String> {
        let mut patterns = self.filter.clone();
        if let Some(preset) = self.preset {
            patterns.extend(preset.patterns().iter().map(|p| p.to_string()));
        }
        patterns
    }

    /// Aggregator options selected by the flags
    pub fn options(&self) -> AggregateOptions {
        let defaults = AggregateOptions::default();
        AggregateOptions {
            parallel: !self.sequential,
            jobs: self.jobs.map_or(defaults.jobs, usize::from),
            mode: self.query_mode,
            failure_policy: if self.strict {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            },
            progress: !self.no_progress,
        }
    }

    /// Log level selected by `-v`
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("changelog-aggregator").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        let options = cli.options();
        assert!(options.parallel);
        assert_eq!(options.mode, QueryMode::Text);
        assert_eq!(options.failure_policy, FailurePolicy::Continue);
        assert!(options.progress);
        assert_eq!(cli.format, RenderFormat::Plain);
        assert!(cli.patterns().is_empty());
        assert_eq!(cli.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_filter_and_preset() {
        let cli = parse(&["bash", "zsh*", "--preset", "kernel"]);
        assert_eq!(cli.patterns(), vec!["bash", "zsh*", "kernel*"]);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&[
            "--sequential",
            "--jobs",
            "4",
            "--query-mode",
            "fields",
            "--format",
            "suse",
            "--strict",
            "--no-progress",
            "-vv",
        ]);
        let options = cli.options();
        assert!(!options.parallel);
        assert_eq!(options.jobs, 4);
        assert_eq!(options.mode, QueryMode::Fields);
        assert_eq!(options.failure_policy, FailurePolicy::Abort);
        assert!(!options.progress);
        assert_eq!(cli.format, RenderFormat::Suse);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let result = Cli::try_parse_from(["changelog-aggregator", "--jobs", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_changes_files() {
        let cli = parse(&["--changes", "a.changes", "-c", "b.changes"]);
        assert_eq!(
            cli.changes,
            vec![PathBuf::from("a.changes"), PathBuf::from("b.changes")]
        );
    }
}
