//! rpm-specific constants
//!
//! Centralized definitions for the rpm binary, its flags and the child
//! process environment.

/// rpm command binary name
pub const RPM_COMMAND: &str = "rpm";

/// rpm command flags
pub mod flags {
    /// Query mode
    pub const QUERY: &str = "-q";
    /// Query all installed packages (patterns narrow it down)
    pub const QUERY_ALL: &str = "-qa";
    /// Print the package changelog in free-text form
    pub const CHANGELOG: &str = "--changelog";
    /// Specify a query format
    pub const QUERY_FORMAT: &str = "--qf";
}

/// Environment pinned on every rpm invocation
///
/// Free-text changelog dates are only parsed in the C locale.
pub mod env {
    pub const LOCALE: &str = "C";
    pub const LC_ALL: &str = "LC_ALL";
    pub const LANG: &str = "LANG";
}

/// SUSE `.changes` file layout
pub mod suse {
    /// Width of the dashed separator line
    pub const HEADER_WIDTH: usize = 67;

    /// Separator between timestamp and author
    pub const TIMESTAMP_AUTHOR_SEPARATOR: &str = " - ";

    /// `date(1)` default output, used by `osc vc`
    pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Z %Y";

    /// File extension of SUSE changelog files
    pub const FILE_EXTENSION: &str = "changes";
}

/// Plain render layout
pub mod plain {
    /// Line preceding every rendered entry
    pub const SEPARATOR: &str = "----";
}
