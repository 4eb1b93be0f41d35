//! File-backed option declarations and built-in bench presets.
//!
//! This crate sits on top of [`argspec_core`] and provides:
//!
//! - [`Declaration`] — a YAML/JSON document listing option entries, compiled
//!   into a [`Schema`](argspec_core::Schema) through the same validation as
//!   programmatic declarations.
//! - [`presets`] — the two benchmark declarations shipped with the crate.
//! - [`BenchSettings`] — typed conversion of a parsed benchmark
//!   configuration.
//!
//! # Quick start
//!
//! ```no_run
//! use argspec_core::parse;
//! use argspec_declarations::{BenchSettings, Declaration};
//!
//! let declaration = Declaration::load("bench.yaml").unwrap();
//! let schema = declaration.to_schema().unwrap();
//! let config = parse(&schema, std::env::args().skip(1)).unwrap();
//! let settings = BenchSettings::from_config(&config).unwrap();
//! println!("running with {} threads", settings.threads);
//! ```

mod declaration;
mod error;
pub mod presets;
mod settings;

pub use declaration::{Declaration, OptionEntry};
pub use error::{DeclarationFileError, Result};
pub use presets::Preset;
pub use settings::{BenchSettings, SettingsError};
