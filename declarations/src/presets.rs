//! Built-in declarations for the persistent hash table benchmark.
//!
//! Two variants exist. [`Preset::DefaultThreads`] takes the three workload
//! files as required options and falls back to a single worker thread.
//! [`Preset::AllRequired`] also requires the thread count and a batch size.

use std::fmt;
use std::str::FromStr;

use argspec_core::{DeclarationError, OptionSpec, Schema, SchemaBuilder};

/// A built-in declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Required `pool_file/p`, `warm_file/w`, `run_file/r`; optional
    /// `threads/t` defaulting to `"1"`.
    DefaultThreads,
    /// Required `pool_file/p`, `warm_file/w`, `run_file/r`, `threads/t`,
    /// `batch/b`.
    AllRequired,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 2] = [Preset::DefaultThreads, Preset::AllRequired];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::DefaultThreads => "bench",
            Preset::AllRequired => "bench-batch",
        }
    }

    /// Builds the preset's schema.
    pub fn schema(self) -> Result<Schema, DeclarationError> {
        match self {
            Preset::DefaultThreads => bench_with_default_threads(),
            Preset::AllRequired => bench_all_required(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        by_name(s).ok_or_else(|| format!("unknown preset: {s}"))
    }
}

/// Looks up a preset by its command-line name or variant letter.
///
/// `"bench"` and `"a"` select [`Preset::DefaultThreads`]; `"bench-batch"` and
/// `"b"` select [`Preset::AllRequired`].
///
/// # Examples
///
/// ```
/// use argspec_declarations::presets::{Preset, by_name};
///
/// assert_eq!(by_name("a"), Some(Preset::DefaultThreads));
/// assert_eq!(by_name("bench-batch"), Some(Preset::AllRequired));
/// assert_eq!(by_name("c"), None);
/// ```
pub fn by_name(name: &str) -> Option<Preset> {
    match name {
        "a" => Some(Preset::DefaultThreads),
        "b" => Some(Preset::AllRequired),
        _ => Preset::ALL.into_iter().find(|p| p.name() == name),
    }
}

/// Workload files required, thread count defaulted.
pub fn bench_with_default_threads() -> Result<Schema, DeclarationError> {
    let mut builder = SchemaBuilder::new();
    builder
        .declare_value("pool_file, p")?
        .declare_value("warm_file, w")?
        .declare_value("run_file, r")?
        .declare_optional("threads, t", Some("1"))?;
    builder.finalize()
}

/// Every option required, including thread count and batch size.
pub fn bench_all_required() -> Result<Schema, DeclarationError> {
    Schema::from_options(vec![
        OptionSpec::required("pool_file", Some('p')).with_description("Pool file to create"),
        OptionSpec::required("warm_file", Some('w')).with_description("Warm-up workload trace"),
        OptionSpec::required("run_file", Some('r')).with_description("Measured workload trace"),
        OptionSpec::required("threads", Some('t')).with_description("Worker thread count"),
        OptionSpec::required("batch", Some('b')).with_description("Operations per batch"),
    ])
}
