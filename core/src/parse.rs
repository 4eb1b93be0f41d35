//! Argument vector parsing and validation.
//!
//! [`parse`] makes a single left-to-right pass over the argument vector.
//! Every flag reference (`--long_name`, `--long_name=value` or `-s`)
//! consumes exactly one value. Repeated flags overwrite earlier values.
//! Once the pass completes, every missing required option is reported
//! together, and optional options that were not supplied take their
//! defaults.
//!
//! # Examples
//!
//! ```
//! use argspec_core::*;
//!
//! let mut builder = SchemaBuilder::new();
//! builder
//!     .declare_value("pool_file, p").unwrap()
//!     .declare_optional("threads, t", Some("1")).unwrap();
//! let schema = builder.finalize().unwrap();
//!
//! let config = parse(&schema, ["--pool_file", "x", "-t", "2", "-t", "4"]).unwrap();
//! assert_eq!(config.get("threads"), Some("4"));
//!
//! let err = parse(&schema, ["--bogus", "1"]).unwrap_err();
//! assert_eq!(err, ParseError::UnknownOption("--bogus".to_string()));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{Config, Schema, ValueSource};

/// Parse-time errors.
///
/// These describe problems with user input and are returned as values; the
/// caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A flag reference that names no declared option.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// A flag reference with no value after it.
    #[error("missing value for option: {0}")]
    MissingValue(String),
    /// Required options left unresolved after the full pass.
    #[error("missing required options: {}", join_names(.0))]
    MissingRequiredOption(BTreeSet<String>),
    /// A value token where a flag reference was expected.
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    /// A process argument that is not valid UTF-8, by argv index.
    #[error("argument {0} is not valid unicode")]
    InvalidUnicode(usize),
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Classification of a single argv entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'a> {
    /// `--name`, or `--name=value` with the inline value.
    Long {
        name: &'a str,
        inline: Option<&'a str>,
    },
    /// `-x`
    Short(char),
    /// A dash-prefixed token naming several characters (`-abc`).
    ShortCluster(&'a str),
    /// Anything else, including a bare `-` or `--`.
    Value(&'a str),
}

impl<'a> RawToken<'a> {
    /// Classifies a raw argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use argspec_core::RawToken;
    ///
    /// assert_eq!(RawToken::classify("-p"), RawToken::Short('p'));
    /// assert_eq!(
    ///     RawToken::classify("--threads=4"),
    ///     RawToken::Long { name: "threads", inline: Some("4") }
    /// );
    /// assert_eq!(RawToken::classify("--"), RawToken::Value("--"));
    /// ```
    pub fn classify(token: &'a str) -> Self {
        if let Some(rest) = token.strip_prefix("--") {
            if rest.is_empty() {
                return RawToken::Value(token);
            }
            return match rest.split_once('=') {
                Some((name, value)) => RawToken::Long {
                    name,
                    inline: Some(value),
                },
                None => RawToken::Long {
                    name: rest,
                    inline: None,
                },
            };
        }

        if let Some(rest) = token.strip_prefix('-') {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (None, _) => RawToken::Value(token),
                (Some(c), None) => RawToken::Short(c),
                (Some(_), Some(_)) => RawToken::ShortCluster(token),
            };
        }

        RawToken::Value(token)
    }
}

/// Parses an argument vector (program name excluded) against a schema.
///
/// # Errors
///
/// - [`ParseError::UnknownOption`] for a flag that names no option.
/// - [`ParseError::MissingValue`] for a trailing flag or an empty inline
///   value.
/// - [`ParseError::UnexpectedArgument`] for a value with no flag before it.
/// - [`ParseError::MissingRequiredOption`] listing every required option
///   that was never supplied.
pub fn parse<I, S>(schema: &Schema, args: I) -> Result<Config, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<S> = args.into_iter().collect();
    let mut supplied: BTreeMap<&str, &str> = BTreeMap::new();

    let mut index = 0;
    while index < args.len() {
        let token = args[index].as_ref();
        let (spec, inline) = match RawToken::classify(token) {
            RawToken::Long { name, inline } => (schema.find_long(name), inline),
            RawToken::Short(short) => (schema.find_short(short), None),
            RawToken::ShortCluster(_) => (None, None),
            RawToken::Value(value) => {
                return Err(ParseError::UnexpectedArgument(value.to_string()));
            }
        };
        let spec = spec.ok_or_else(|| ParseError::UnknownOption(token.to_string()))?;

        let value = match inline {
            Some("") => return Err(ParseError::MissingValue(spec.long_name.clone())),
            Some(value) => value,
            None => {
                index += 1;
                args.get(index)
                    .map(|next| next.as_ref())
                    .ok_or_else(|| ParseError::MissingValue(spec.long_name.clone()))?
            }
        };

        if let Some(previous) = supplied.insert(spec.long_name.as_str(), value) {
            debug!(option = %spec.long_name, previous, value, "option overridden");
        } else {
            debug!(option = %spec.long_name, value, "option resolved");
        }
        index += 1;
    }

    let missing: BTreeSet<String> = schema
        .options()
        .iter()
        .filter(|o| o.required && !supplied.contains_key(o.long_name.as_str()))
        .map(|o| o.long_name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::MissingRequiredOption(missing));
    }

    let mut config = Config::default();
    for spec in schema {
        if let Some(value) = supplied.get(spec.long_name.as_str()) {
            config.insert(&spec.long_name, value.to_string(), ValueSource::CommandLine);
        } else if let Some(default) = &spec.default {
            trace!(option = %spec.long_name, default = %default, "default applied");
            config.insert(&spec.long_name, default.clone(), ValueSource::Default);
        }
    }

    Ok(config)
}

/// Parses the current process arguments, skipping the program name.
///
/// # Errors
///
/// As [`parse_os`].
pub fn parse_env(schema: &Schema) -> Result<Config, ParseError> {
    parse_os(schema, std::env::args_os().skip(1))
}

/// Parses OS-encoded arguments (program name excluded) against a schema.
///
/// # Errors
///
/// [`ParseError::InvalidUnicode`] with the argv index of the first argument
/// that is not valid UTF-8, counting the program name as index 0. Otherwise
/// as [`parse`].
pub fn parse_os<I>(schema: &Schema, args: I) -> Result<Config, ParseError>
where
    I: IntoIterator<Item = OsString>,
{
    let args = args
        .into_iter()
        .enumerate()
        .map(|(position, arg)| {
            arg.into_string()
                .map_err(|_| ParseError::InvalidUnicode(position + 1))
        })
        .collect::<Result<Vec<_>, _>>()?;
    parse(schema, args)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{OptionSpec, SchemaBuilder};

    fn variant_a() -> Schema {
        let mut builder = SchemaBuilder::new();
        builder
            .declare_value("pool_file, p")
            .unwrap()
            .declare_value("warm_file, w")
            .unwrap()
            .declare_value("run_file, r")
            .unwrap()
            .declare_optional("threads, t", Some("1"))
            .unwrap();
        builder.finalize().unwrap()
    }

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_tokens() {
        assert_eq!(
            RawToken::classify("--pool_file"),
            RawToken::Long {
                name: "pool_file",
                inline: None
            }
        );
        assert_eq!(
            RawToken::classify("--run_file="),
            RawToken::Long {
                name: "run_file",
                inline: Some("")
            }
        );
        assert_eq!(RawToken::classify("-pq"), RawToken::ShortCluster("-pq"));
        assert_eq!(RawToken::classify("-"), RawToken::Value("-"));
        assert_eq!(RawToken::classify("file.txt"), RawToken::Value("file.txt"));
    }

    #[test]
    fn test_default_substitution() {
        let config = parse(
            &variant_a(),
            ["--pool_file", "x", "--warm_file", "y", "--run_file", "z"],
        )
        .unwrap();

        assert_eq!(config.len(), 4);
        assert_eq!(config.get("threads"), Some("1"));
        assert_eq!(config.source("threads"), Some(ValueSource::Default));
        assert_eq!(config.source("run_file"), Some(ValueSource::CommandLine));
    }

    #[test]
    fn test_alias_equivalence() {
        let schema = variant_a();
        let short = parse(&schema, ["-p", "x", "-w", "y", "-r", "z"]).unwrap();
        let long = parse(
            &schema,
            ["--pool_file", "x", "--warm_file", "y", "--run_file", "z"],
        )
        .unwrap();

        assert_eq!(short, long);
        assert_eq!(short.get("pool_file"), Some("x"));
    }

    #[test]
    fn test_last_write_wins() {
        let config = parse(
            &variant_a(),
            ["-p", "x", "-w", "y", "-r", "z", "--threads", "2", "--threads", "4"],
        )
        .unwrap();

        assert_eq!(config.get("threads"), Some("4"));
        assert_eq!(config.source("threads"), Some(ValueSource::CommandLine));
    }

    #[test]
    fn test_last_write_wins_across_forms() {
        let config = parse(
            &variant_a(),
            ["-p", "x", "-w", "y", "-r", "z", "--pool_file=a", "-p", "b"],
        )
        .unwrap();

        assert_eq!(config.get("pool_file"), Some("b"));
    }

    #[test]
    fn test_inline_value() {
        let config = parse(
            &variant_a(),
            ["--pool_file=x", "--warm_file=y=z", "-r", "z", "--threads=8"],
        )
        .unwrap();

        assert_eq!(config.get("pool_file"), Some("x"));
        assert_eq!(config.get("warm_file"), Some("y=z"));
        assert_eq!(config.get("threads"), Some("8"));
    }

    #[test]
    fn test_empty_inline_value() {
        assert_eq!(
            parse(&variant_a(), ["--pool_file="]).unwrap_err(),
            ParseError::MissingValue("pool_file".to_string())
        );
    }

    #[test]
    fn test_missing_required_aggregated() {
        assert_eq!(
            parse(&variant_a(), Vec::<String>::new()).unwrap_err(),
            ParseError::MissingRequiredOption(names(&["pool_file", "run_file", "warm_file"]))
        );
        assert_eq!(
            parse(&variant_a(), ["-w", "y"]).unwrap_err(),
            ParseError::MissingRequiredOption(names(&["pool_file", "run_file"]))
        );
    }

    #[test]
    fn test_missing_required_display_lists_all() {
        let err = parse(&variant_a(), ["-t", "2"]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "missing required options: pool_file, run_file, warm_file"
        );
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            parse(&variant_a(), ["--unknown", "value"]).unwrap_err(),
            ParseError::UnknownOption("--unknown".to_string())
        );
        assert_eq!(
            parse(&variant_a(), ["-x", "value"]).unwrap_err(),
            ParseError::UnknownOption("-x".to_string())
        );
        assert_eq!(
            parse(&variant_a(), ["-pw", "value"]).unwrap_err(),
            ParseError::UnknownOption("-pw".to_string())
        );
    }

    #[test]
    fn test_unknown_option_wins_over_missing_required() {
        assert_eq!(
            parse(&variant_a(), ["-p", "x", "--unknown", "value"]).unwrap_err(),
            ParseError::UnknownOption("--unknown".to_string())
        );
    }

    #[test]
    fn test_dangling_flag() {
        assert_eq!(
            parse(&variant_a(), ["-w", "y", "-p"]).unwrap_err(),
            ParseError::MissingValue("pool_file".to_string())
        );
    }

    #[test]
    fn test_value_may_start_with_dash() {
        let config = parse(&variant_a(), ["-p", "-w", "-w", "y", "-r", "--"]).unwrap();

        assert_eq!(config.get("pool_file"), Some("-w"));
        assert_eq!(config.get("run_file"), Some("--"));
    }

    #[test]
    fn test_stray_positional_rejected() {
        assert_eq!(
            parse(&variant_a(), ["pool.dat", "-p", "x"]).unwrap_err(),
            ParseError::UnexpectedArgument("pool.dat".to_string())
        );
        assert_eq!(
            parse(&variant_a(), ["--", "-p", "x"]).unwrap_err(),
            ParseError::UnexpectedArgument("--".to_string())
        );
    }

    #[test]
    fn test_every_option_resolved_once() {
        let schema = Schema::from_options(vec![
            OptionSpec::required("pool_file", Some('p')),
            OptionSpec::required("warm_file", Some('w')),
            OptionSpec::required("run_file", Some('r')),
            OptionSpec::required("threads", Some('t')),
            OptionSpec::required("batch", Some('b')),
        ])
        .unwrap();
        let config = parse(
            &schema,
            ["-b", "64", "-t", "8", "-r", "run", "-w", "warm", "-p", "pool"],
        )
        .unwrap();

        assert_eq!(config.len(), schema.len());
        for spec in &schema {
            assert!(config.contains(&spec.long_name), "{}", spec.long_name);
        }
        assert_eq!(config.get_parsed::<u64>("batch"), Ok(64));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let schema = variant_a();
        let args = ["-p", "x", "--warm_file", "y", "-r", "z", "-t", "3"];

        assert_eq!(parse(&schema, args), parse(&schema, args));
    }

    #[test]
    fn test_empty_schema() {
        let schema = SchemaBuilder::new().finalize().unwrap();

        assert!(parse(&schema, Vec::<&str>::new()).unwrap().is_empty());
        assert_eq!(
            parse(&schema, ["-p", "x"]).unwrap_err(),
            ParseError::UnknownOption("-p".to_string())
        );
    }

    #[test]
    fn test_parse_os_accepts_unicode() {
        let args = ["-p", "x", "-w", "y", "-r", "z", "-t", "2"].map(OsString::from);
        let config = parse_os(&variant_a(), args).unwrap();

        assert_eq!(config.get("threads"), Some("2"));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_os_reports_argv_index_of_invalid_unicode() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("-p"),
            OsString::from_vec(vec![0xff]),
            OsString::from("-w"),
        ];

        assert_eq!(
            parse_os(&variant_a(), args).unwrap_err(),
            ParseError::InvalidUnicode(2)
        );
    }

    #[test]
    fn test_concurrent_parses_share_schema() {
        let schema = Arc::new(variant_a());
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let schema = Arc::clone(&schema);
                std::thread::spawn(move || {
                    let threads = n.to_string();
                    parse(&schema, ["-p", "x", "-w", "y", "-r", "z", "-t", threads.as_str()])
                })
            })
            .collect();

        for (n, handle) in handles.into_iter().enumerate() {
            let config = handle.join().unwrap().unwrap();
            assert_eq!(config.get_parsed::<usize>("threads"), Ok(n));
        }
    }
}
