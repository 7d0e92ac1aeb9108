//! rpm command executor
//!
//! Handles running rpm queries and capturing their output.

use std::process::Command;

use super::RpmError;
use super::constants::{self, env, flags};
use super::template::Templates;
use crate::config::QueryMode;

/// Where raw changelog text comes from
///
/// [`RpmExecutor`] is the production implementation; the aggregator only
/// depends on this trait.
pub trait ChangelogSource: Sync {
    /// List installed package names matching `filter` (all when empty)
    fn list_packages(&self, filter: &[String]) -> Result<Vec<String>, RpmError>;

    /// Fetch the raw changelog of one package in the given query mode
    fn fetch(&self, package: &str, mode: QueryMode) -> Result<String, RpmError>;
}

/// Executor for rpm commands
#[derive(Debug, Clone, Default)]
pub struct RpmExecutor {
    /// Alternate database root passed as `--root` (None = system database)
    root: Option<String>,
}

impl RpmExecutor {
    /// Create a new executor for the system rpm database
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Create a new executor for an alternate installation root
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(constants::RPM_COMMAND);

        // Pin the locale so changelog dates come out in C format
        cmd.env(env::LC_ALL, env::LOCALE).env(env::LANG, env::LOCALE);

        if let Some(ref root) = self.root {
            cmd.arg("--root").arg(root);
        }

        // Arguments are passed as a list, never through a shell
        cmd.args(args);
        cmd
    }

    /// Run an rpm command with the given arguments
    pub fn run(&self, args: &[&str]) -> Result<String, RpmError> {
        let output = self.command(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RpmError::RpmNotFound
            } else {
                RpmError::Io(e)
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let exit_code = output.status.code().unwrap_or(-1);
            Err(RpmError::CommandFailed { stderr, exit_code })
        }
    }

    /// Run `rpm -qa` with optional name patterns
    pub fn list_raw(&self, patterns: &[String]) -> Result<String, RpmError> {
        let mut args = vec![flags::QUERY_ALL];
        args.extend(patterns.iter().map(String::as_str));
        self.run(&args)
    }

    /// Run `rpm -q --changelog` for one package
    pub fn changelog_raw(&self, package: &str) -> Result<String, RpmError> {
        self.run(&[flags::QUERY, flags::CHANGELOG, package])
    }

    /// Run `rpm -q --qf <field stream>` for one package
    pub fn changelog_fields_raw(&self, package: &str) -> Result<String, RpmError> {
        self.run(&[
            flags::QUERY,
            flags::QUERY_FORMAT,
            Templates::field_stream(),
            package,
        ])
    }
}

impl ChangelogSource for RpmExecutor {
    fn list_packages(&self, filter: &[String]) -> Result<Vec<String>, RpmError> {
        let output = self.list_raw(filter)?;
        Ok(split_package_list(&output))
    }

    fn fetch(&self, package: &str, mode: QueryMode) -> Result<String, RpmError> {
        match mode {
            QueryMode::Text => self.changelog_raw(package),
            QueryMode::Fields => self.changelog_fields_raw(package),
        }
    }
}

/// Split `rpm -qa` output into package names
fn split_package_list(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_default() {
        let executor = RpmExecutor::default();
        assert!(executor.root.is_none());
    }

    #[test]
    fn test_executor_with_root() {
        let executor = RpmExecutor::with_root("/mnt/sysimage");
        assert_eq!(executor.root.as_deref(), Some("/mnt/sysimage"));
    }

    #[test]
    fn test_command_pins_locale() {
        let cmd = RpmExecutor::new().command(&["-qa"]);
        let envs: Vec<_> = cmd
            .get_envs()
            .map(|(k, v)| (k.to_owned(), v.map(|v| v.to_owned())))
            .collect();
        assert!(envs.contains(&("LC_ALL".into(), Some("C".into()))));
        assert!(envs.contains(&("LANG".into(), Some("C".into()))));
    }

    #[test]
    fn test_command_keeps_filter_as_single_argument() {
        let cmd = RpmExecutor::new().command(&["-qa", "foo; rm -rf /"]);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["-qa", "foo; rm -rf /"]);
    }

    #[test]
    fn test_command_with_root() {
        let cmd = RpmExecutor::with_root("/mnt").command(&["-qa"]);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["--root", "/mnt", "-qa"]);
    }

    #[test]
    fn test_split_package_list() {
        let output = "bash-5.2.15-3.fc39.x86_64\nzsh-5.9-6.fc39.x86_64\n\n";
        assert_eq!(
            split_package_list(output),
            vec!["bash-5.2.15-3.fc39.x86_64", "zsh-5.9-6.fc39.x86_64"]
        );
        assert!(split_package_list("").is_empty());
    }
}
