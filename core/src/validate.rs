//! Declaration validation.
//!
//! Checks the structural invariants of option declarations: well-formed
//! names, unique long and short forms, and defaults present exactly on
//! optional options. The builder runs these checks on every registration;
//! [`validate_options`] runs them over a whole list and reports every
//! problem found.
//!
//! # Examples
//!
//! ```
//! use argspec_core::*;
//!
//! let options = vec![
//!     OptionSpec::required("pool_file", Some('p')),
//!     OptionSpec::required("pool_file", Some('q')),
//! ];
//! assert_eq!(
//!     validate_options(&options),
//!     vec![DeclarationError::DuplicateOption("pool_file".to_string())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::OptionSpec;

/// Declaration-time errors.
///
/// These indicate that a declaration itself is invalid and are normally
/// fatal to program startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// A long name or short alias is already registered.
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    /// An optional option was declared without a default value.
    #[error("optional option has no default: {0}")]
    MissingDefault(String),
    /// A declaration call arrived after the builder was finalized.
    #[error("schema already finalized")]
    SchemaAlreadyFinalized,
    /// A spec string or option name is malformed.
    #[error("invalid option spec: {0:?}")]
    InvalidSpec(String),
}

/// Validates a single option descriptor in isolation.
///
/// Long names must be non-empty, must not start with a dash, and may not
/// contain whitespace or `=`. Short aliases must be ASCII alphanumeric.
/// Required options must not carry a default; optional options must.
pub fn validate_option(spec: &OptionSpec) -> Result<(), DeclarationError> {
    let long = spec.long_name.as_str();
    if long.is_empty()
        || long.starts_with('-')
        || long.contains('=')
        || long.chars().any(char::is_whitespace)
    {
        return Err(DeclarationError::InvalidSpec(long.to_string()));
    }

    if let Some(short) = spec.short_name {
        if !short.is_ascii_alphanumeric() {
            return Err(DeclarationError::InvalidSpec(format!("{long}, {short}")));
        }
    }

    match (spec.required, spec.default.is_some()) {
        (true, true) => Err(DeclarationError::InvalidSpec(format!(
            "{long}: required option cannot have a default"
        ))),
        (false, false) => Err(DeclarationError::MissingDefault(long.to_string())),
        _ => Ok(()),
    }
}

/// Validates a list of option descriptors.
///
/// Returns every problem found, in declaration order. An empty vector means
/// the list can be turned into a [`Schema`](crate::Schema).
pub fn validate_options(options: &[OptionSpec]) -> Vec<DeclarationError> {
    let mut errors = Vec::new();
    let mut seen_long: HashSet<&str> = HashSet::new();
    let mut seen_short: HashSet<char> = HashSet::new();

    for spec in options {
        if let Err(err) = validate_option(spec) {
            errors.push(err);
            continue;
        }
        if !seen_long.insert(spec.long_name.as_str()) {
            errors.push(DeclarationError::DuplicateOption(spec.long_name.clone()));
            continue;
        }
        if let Some(short) = spec.short_name {
            if !seen_short.insert(short) {
                errors.push(DeclarationError::DuplicateOption(format!("-{short}")));
            }
        }
    }

    errors
}
