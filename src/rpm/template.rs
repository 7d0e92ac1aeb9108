//! rpm query format definitions for stable output parsing
//!
//! The field-stream template makes rpm print one record per changelog
//! entry in a fixed field order, regardless of locale or rpm version.

/// Line terminating every record of the field stream
///
/// Never produced by rpm itself and not expected inside changelog text.
pub const FIELD_SENTINEL: &str = "@@CHANGELOG-AGGREGATOR-END@@";

/// What rpm prints for an absent tag; read back as a missing subject
pub const NONE_VALUE: &str = "(none)";

/// Query formats for rpm commands
pub struct Templates;

impl Templates {
    /// Template for `rpm -q --qf`
    ///
    /// Fields (one per line), repeated for every changelog entry:
    /// 1. package identifier (`%{NVRA}`, the form `rpm -qa` lists)
    /// 2. changelog time (seconds since the epoch)
    /// 3. changelog author
    /// 4. changelog text (any number of lines)
    /// 5. [`FIELD_SENTINEL`]
    ///
    /// Notes:
    /// - `[...]` iterates the changelog arrays in parallel; the scalar
    ///   identifier needs the `=` prefix to repeat on every iteration, rpm
    ///   rejects differently sized arrays otherwise.
    /// - `:date` formatting is avoided on purpose so the stream stays
    ///   locale independent.
    pub fn field_stream() -> &'static str {
        concat!(
            "[",
            "%{=NVRA}\\n",
            "%{CHANGELOGTIME}\\n",
            "%{CHANGELOGNAME}\\n",
            "%{CHANGELOGTEXT}\\n",
            "@@CHANGELOG-AGGREGATOR-END@@\\n",
            "]"
        )
    }
}
