//! Run configuration
//!
//! Options shared by the aggregator and the command line. Everything has a
//! default so library callers only set what they care about.

/// How changelogs are requested from rpm
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// `rpm -q --changelog`, parsed heuristically
    #[default]
    Text,
    /// `rpm -q --qf` with a fixed field stream, parsed strictly
    Fields,
}

/// What to do when fetching one package's changelog fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and carry on without that package
    #[default]
    Continue,
    /// Fail the whole run
    Abort,
}

/// Named package filters
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Kernel packages
    Kernel,
    /// Development headers and tools
    Devel,
    /// Shared libraries
    Libs,
}

impl Preset {
    /// rpm name patterns selected by this preset
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Kernel => &["kernel*"],
            Self::Devel => &["*-devel", "*-headers"],
            Self::Libs => &["lib*"],
        }
    }
}

/// Options for [`aggregate`](crate::aggregate::aggregate)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Fetch packages concurrently
    pub parallel: bool,
    /// Maximum number of concurrent fetches
    pub jobs: usize,
    pub mode: QueryMode,
    pub failure_policy: FailurePolicy,
    /// Print one progress marker per package to stderr
    pub progress: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: num_cpus::get(),
            mode: QueryMode::default(),
            failure_policy: FailurePolicy::default(),
            progress: true,
        }
    }
}

impl AggregateOptions {
    /// Options for library and test use: no progress output
    pub fn quiet() -> Self {
        Self {
            progress: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = AggregateOptions::default();
        assert!(options.parallel);
        assert!(options.jobs >= 1);
        assert_eq!(options.mode, QueryMode::Text);
        assert_eq!(options.failure_policy, FailurePolicy::Continue);
        assert!(options.progress);
    }

    #[test]
    fn test_quiet_options() {
        assert!(!AggregateOptions::quiet().progress);
    }

    #[test]
    fn test_preset_patterns() {
        assert_eq!(Preset::Kernel.patterns(), &["kernel*"]);
        assert!(Preset::Devel.patterns().contains(&"*-devel"));
        assert!(!Preset::Libs.patterns().is_empty());
    }
}
