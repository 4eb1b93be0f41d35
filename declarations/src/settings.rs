//! Typed benchmark settings.
//!
//! Parsing leaves every value as text. The benchmark host converts the
//! resolved configuration into [`BenchSettings`], checking that counts are
//! positive integers.

use std::path::PathBuf;

use argspec_core::Config;
use serde::Serialize;
use thiserror::Error;

/// Errors converting a parsed configuration into [`BenchSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A required setting is absent from the configuration.
    #[error("missing setting: {0}")]
    Missing(String),
    /// The value is not an integer.
    #[error("invalid number for {option}: {value:?}")]
    InvalidNumber { option: String, value: String },
    /// The value is an integer but not a usable one.
    #[error("{option} must be at least 1, got {value}")]
    OutOfRange { option: String, value: String },
}

/// Benchmark settings resolved from either bench preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchSettings {
    pub pool_file: PathBuf,
    pub warm_file: PathBuf,
    pub run_file: PathBuf,
    pub threads: usize,
    /// Only present for declarations that include `batch`.
    pub batch: Option<u64>,
}

impl BenchSettings {
    /// Converts a parsed configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use argspec_core::parse;
    /// use argspec_declarations::{BenchSettings, presets};
    ///
    /// let schema = presets::bench_with_default_threads().unwrap();
    /// let config = parse(&schema, ["-p", "pool", "-w", "warm", "-r", "run"]).unwrap();
    /// let settings = BenchSettings::from_config(&config).unwrap();
    ///
    /// assert_eq!(settings.threads, 1);
    /// assert_eq!(settings.batch, None);
    /// ```
    pub fn from_config(config: &Config) -> Result<Self, SettingsError> {
        let path = |name: &str| {
            config
                .get(name)
                .map(PathBuf::from)
                .ok_or_else(|| SettingsError::Missing(name.to_string()))
        };

        let threads = match config.get("threads") {
            Some(raw) => positive::<usize>("threads", raw)?,
            None => return Err(SettingsError::Missing("threads".to_string())),
        };
        let batch = config
            .get("batch")
            .map(|raw| positive::<u64>("batch", raw))
            .transpose()?;

        Ok(Self {
            pool_file: path("pool_file")?,
            warm_file: path("warm_file")?,
            run_file: path("run_file")?,
            threads,
            batch,
        })
    }
}

fn positive<T>(option: &str, raw: &str) -> Result<T, SettingsError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    let value: T = raw.trim().parse().map_err(|_| SettingsError::InvalidNumber {
        option: option.to_string(),
        value: raw.to_string(),
    })?;
    if value < T::from(1) {
        return Err(SettingsError::OutOfRange {
            option: option.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(value)
}
