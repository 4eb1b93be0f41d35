//! Parse results.
//!
//! A [`Config`] is the validated outcome of one successful parse call: one
//! raw textual value per declared option, keyed by long name. Converting
//! values into numbers or paths is left to the caller;
//! [`Config::get_parsed`] covers the common `FromStr` case.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueSource {
    /// Supplied in the argument vector.
    CommandLine,
    /// Substituted from the option's declared default.
    Default,
}

/// Errors from caller-side value conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The option is not part of the configuration.
    #[error("no value for option: {0}")]
    Missing(String),
    /// The raw value could not be converted to the requested type.
    #[error("invalid value {value:?} for option {option}: {reason}")]
    Invalid {
        option: String,
        value: String,
        reason: String,
    },
}

/// Fully resolved option values, keyed by long name.
///
/// Contains exactly one entry per option of the schema it was parsed
/// against. Serializes as a plain map of long name to value.
///
/// # Examples
///
/// ```
/// use argspec_core::{OptionSpec, Schema, ValueSource, parse};
///
/// let schema = Schema::from_options(vec![
///     OptionSpec::required("pool_file", Some('p')),
///     OptionSpec::optional("threads", Some('t'), "1"),
/// ])
/// .unwrap();
///
/// let config = parse(&schema, ["-p", "/mnt/pool"]).unwrap();
/// assert_eq!(config.get("pool_file"), Some("/mnt/pool"));
/// assert_eq!(config.get_parsed::<usize>("threads"), Ok(1));
/// assert_eq!(config.source("threads"), Some(ValueSource::Default));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    values: BTreeMap<String, String>,
    defaulted: BTreeSet<String>,
}

impl Config {
    pub(crate) fn insert(&mut self, name: &str, value: String, source: ValueSource) {
        if source == ValueSource::Default {
            self.defaulted.insert(name.to_string());
        }
        self.values.insert(name.to_string(), value);
    }

    /// Returns the raw value of an option.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns `true` if the option has a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Reports whether the value was supplied or defaulted.
    pub fn source(&self, name: &str) -> Option<ValueSource> {
        if !self.values.contains_key(name) {
            return None;
        }
        if self.defaulted.contains(name) {
            Some(ValueSource::Default)
        } else {
            Some(ValueSource::CommandLine)
        }
    }

    /// Converts an option's value with [`FromStr`].
    ///
    /// # Errors
    ///
    /// [`ValueError::Missing`] if the option is absent, [`ValueError::Invalid`]
    /// if conversion fails.
    pub fn get_parsed<T>(&self, name: &str) -> Result<T, ValueError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self
            .get(name)
            .ok_or_else(|| ValueError::Missing(name.to_string()))?;
        raw.parse().map_err(|err: T::Err| ValueError::Invalid {
            option: name.to_string(),
            value: raw.to_string(),
            reason: err.to_string(),
        })
    }

    /// Iterates over `(long_name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of resolved options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was resolved (only for empty schemas).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the configuration, returning the name/value map.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut config = Config::default();
        config.insert("pool_file", "/tmp/pool".to_string(), ValueSource::CommandLine);
        config.insert("threads", "four".to_string(), ValueSource::Default);
        config
    }

    #[test]
    fn test_source_tracks_defaults() {
        let config = sample();

        assert_eq!(config.source("pool_file"), Some(ValueSource::CommandLine));
        assert_eq!(config.source("threads"), Some(ValueSource::Default));
        assert_eq!(config.source("batch"), None);
    }

    #[test]
    fn test_get_parsed_reports_conversion_failure() {
        let config = sample();
        let err = config.get_parsed::<usize>("threads").unwrap_err();

        assert!(matches!(
            err,
            ValueError::Invalid { ref option, ref value, .. } if option == "threads" && value == "four"
        ));
        assert_eq!(
            config.get_parsed::<u64>("batch"),
            Err(ValueError::Missing("batch".to_string()))
        );
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"pool_file": "/tmp/pool", "threads": "four"})
        );
    }
}
