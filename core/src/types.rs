//! Option descriptor definitions.
//!
//! An [`OptionSpec`] describes a single named option: its long form, an
//! optional single-character short alias, and whether the caller must supply
//! it or may fall back to a declared default. The types serialize with
//! [`serde`] so declarations can live in files as well as in code.

use serde::{Deserialize, Serialize};

/// Descriptor for one option accepted by a program.
///
/// Every option consumes exactly one value token. Required options carry no
/// default; optional options always carry one, so a successful parse never
/// leaves an option unresolved.
///
/// Use [`required`](OptionSpec::required) and
/// [`optional`](OptionSpec::optional) to create descriptors, then chain
/// [`with_description`](OptionSpec::with_description) for help text.
///
/// # Examples
///
/// ```
/// use argspec_core::OptionSpec;
///
/// let pool = OptionSpec::required("pool_file", Some('p'));
/// assert!(pool.required);
/// assert_eq!(pool.long_flag(), "--pool_file");
/// assert_eq!(pool.short_flag().as_deref(), Some("-p"));
///
/// let threads = OptionSpec::optional("threads", Some('t'), "1")
///     .with_description("Worker thread count");
/// assert!(!threads.required);
/// assert_eq!(threads.default.as_deref(), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long form without leading dashes (e.g. "pool_file")
    pub long_name: String,
    /// Short alias without leading dash (e.g. 'p')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<char>,
    /// Whether the option must be supplied on the command line
    pub required: bool,
    /// Fallback value for optional options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Help text shown in usage output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionSpec {
    /// Creates a required option with no default.
    pub fn required(long_name: &str, short_name: Option<char>) -> Self {
        Self {
            long_name: long_name.to_string(),
            short_name,
            required: true,
            default: None,
            description: None,
        }
    }

    /// Creates an optional option that falls back to `default`.
    pub fn optional(long_name: &str, short_name: Option<char>, default: &str) -> Self {
        Self {
            long_name: long_name.to_string(),
            short_name,
            required: false,
            default: Some(default.to_string()),
            description: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns the long flag as typed on the command line (`--name`).
    pub fn long_flag(&self) -> String {
        format!("--{}", self.long_name)
    }

    /// Returns the short flag as typed on the command line (`-x`), if any.
    pub fn short_flag(&self) -> Option<String> {
        self.short_name.map(|c| format!("-{c}"))
    }

    /// Checks if a raw token names this option exactly, in long or short form.
    ///
    /// Inline values (`--name=value`) do not match; the parser splits those
    /// before lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use argspec_core::OptionSpec;
    ///
    /// let spec = OptionSpec::required("warm_file", Some('w'));
    /// assert!(spec.matches("--warm_file"));
    /// assert!(spec.matches("-w"));
    /// assert!(!spec.matches("-warm_file"));
    /// assert!(!spec.matches("--w"));
    /// ```
    pub fn matches(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return long == self.long_name;
        }
        match (token.strip_prefix('-'), self.short_name) {
            (Some(rest), Some(short)) => {
                let mut chars = rest.chars();
                chars.next() == Some(short) && chars.next().is_none()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_has_no_default() {
        let spec = OptionSpec::required("run_file", Some('r'));

        assert!(spec.required);
        assert_eq!(spec.default, None);
        assert_eq!(spec.short_name, Some('r'));
    }

    #[test]
    fn test_optional_carries_default() {
        let spec = OptionSpec::optional("threads", None, "1");

        assert!(!spec.required);
        assert_eq!(spec.default.as_deref(), Some("1"));
        assert_eq!(spec.short_flag(), None);
    }

    #[test]
    fn test_matches_requires_exact_form() {
        let spec = OptionSpec::required("pool_file", Some('p'));

        assert!(spec.matches("--pool_file"));
        assert!(spec.matches("-p"));
        assert!(!spec.matches("--pool"));
        assert!(!spec.matches("-pp"));
        assert!(!spec.matches("pool_file"));
        assert!(!spec.matches("--pool_file=x"));
    }

    #[test]
    fn test_serde_skips_absent_fields() {
        let spec = OptionSpec::required("batch", Some('b'));
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"long_name": "batch", "short_name": "b", "required": true})
        );
    }
}
