//! Declarative option schemas and argument vector validation.
//!
//! This crate turns a declaration of the options a program accepts into a
//! validated, fully populated configuration:
//!
//! - [`OptionSpec`] — one option with a long name, an optional short alias,
//!   and either "required" or "optional with default".
//! - [`SchemaBuilder`] — fluent declaration surface that validates each
//!   option as it is registered and compiles an immutable [`Schema`].
//! - [`parse`] — matches an argument vector against a schema, producing a
//!   [`Config`] or a [`ParseError`].
//!
//! Usage text for error reporting comes from [`usage_line`] and
//! [`help_text`].
//!
//! # Example
//!
//! ```
//! use argspec_core::*;
//!
//! let mut builder = SchemaBuilder::new();
//! builder
//!     .declare_value("pool_file, p").unwrap()
//!     .declare_value("warm_file, w").unwrap()
//!     .declare_value("run_file, r").unwrap()
//!     .declare_optional("threads, t", Some("1")).unwrap();
//! let schema = builder.finalize().unwrap();
//!
//! let config = parse(&schema, ["-p", "pool", "-w", "warm", "-r", "run"]).unwrap();
//! assert_eq!(config.get("threads"), Some("1"));
//!
//! let err = parse(&schema, ["-t", "4"]).unwrap_err();
//! assert!(matches!(err, ParseError::MissingRequiredOption(ref names) if names.len() == 3));
//! ```

mod builder;
mod config;
mod parse;
mod schema;
mod types;
mod usage;
mod validate;

pub use builder::{SchemaBuilder, parse_spec_string};
pub use config::{Config, ValueError, ValueSource};
pub use parse::{ParseError, RawToken, parse, parse_env, parse_os};
pub use schema::Schema;
pub use types::OptionSpec;
pub use usage::{help_text, usage_line};
pub use validate::{DeclarationError, validate_option, validate_options};
