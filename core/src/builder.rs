//! Specification builder.
//!
//! Accumulates option declarations and compiles them into a [`Schema`].
//! Every declaration is checked as it is registered, so an invalid
//! declaration surfaces at the call that introduced it.

use tracing::debug;

use crate::validate::validate_option;
use crate::{DeclarationError, OptionSpec, Schema};

/// Fluent declaration surface for a [`Schema`].
///
/// Declarations take either a `"long_name, short_name"` spec string or an
/// explicit [`OptionSpec`]. Calls chain through `?`. Once
/// [`finalize`](SchemaBuilder::finalize) has run, the builder is consumed and
/// every further call fails with
/// [`SchemaAlreadyFinalized`](DeclarationError::SchemaAlreadyFinalized).
///
/// # Examples
///
/// ```
/// use argspec_core::{DeclarationError, SchemaBuilder};
///
/// # fn main() -> Result<(), DeclarationError> {
/// let mut builder = SchemaBuilder::new();
/// builder
///     .declare_value("pool_file, p")?
///     .declare_value("warm_file, w")?
///     .declare_value("run_file, r")?
///     .declare_optional("threads, t", Some("1"))?;
/// let schema = builder.finalize()?;
///
/// assert_eq!(schema.len(), 4);
/// assert_eq!(
///     builder.declare_value("batch, b").unwrap_err(),
///     DeclarationError::SchemaAlreadyFinalized
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    options: Vec<OptionSpec>,
    finalized: bool,
}

impl SchemaBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a required option from a `"long_name, short_name"` string.
    ///
    /// # Errors
    ///
    /// [`DuplicateOption`](DeclarationError::DuplicateOption) when the long or
    /// short name is taken, [`InvalidSpec`](DeclarationError::InvalidSpec)
    /// when the string is malformed.
    pub fn declare_value(&mut self, spec: &str) -> Result<&mut Self, DeclarationError> {
        self.ensure_open()?;
        let (long, short) = parse_spec_string(spec)?;
        self.declare(OptionSpec::required(&long, short))
    }

    /// Registers an optional option from a `"long_name, short_name"` string.
    ///
    /// # Errors
    ///
    /// Same as [`declare_value`](SchemaBuilder::declare_value), plus
    /// [`MissingDefault`](DeclarationError::MissingDefault) when `default` is
    /// `None`.
    pub fn declare_optional(
        &mut self,
        spec: &str,
        default: Option<&str>,
    ) -> Result<&mut Self, DeclarationError> {
        self.ensure_open()?;
        let (long, short) = parse_spec_string(spec)?;
        let Some(default) = default else {
            return Err(DeclarationError::MissingDefault(long));
        };
        self.declare(OptionSpec::optional(&long, short, default))
    }

    /// Registers an explicit option descriptor.
    pub fn declare(&mut self, spec: OptionSpec) -> Result<&mut Self, DeclarationError> {
        self.ensure_open()?;
        validate_option(&spec)?;

        if self.options.iter().any(|o| o.long_name == spec.long_name) {
            return Err(DeclarationError::DuplicateOption(spec.long_name));
        }
        if let Some(short) = spec.short_name {
            if self.options.iter().any(|o| o.short_name == Some(short)) {
                return Err(DeclarationError::DuplicateOption(format!("-{short}")));
            }
        }

        debug!(
            option = %spec.long_name,
            short = ?spec.short_name,
            required = spec.required,
            "declared option"
        );
        self.options.push(spec);
        Ok(self)
    }

    /// Compiles the accumulated declarations into an immutable [`Schema`].
    ///
    /// # Errors
    ///
    /// [`SchemaAlreadyFinalized`](DeclarationError::SchemaAlreadyFinalized)
    /// when called a second time.
    pub fn finalize(&mut self) -> Result<Schema, DeclarationError> {
        self.ensure_open()?;
        self.finalized = true;
        let options = std::mem::take(&mut self.options);
        debug!(options = options.len(), "schema finalized");
        Ok(Schema::from_validated(options))
    }

    fn ensure_open(&self) -> Result<(), DeclarationError> {
        if self.finalized {
            Err(DeclarationError::SchemaAlreadyFinalized)
        } else {
            Ok(())
        }
    }
}

/// Splits a `"long_name, short_name"` spec string into its parts.
///
/// Parts are whitespace-trimmed. The short part is optional; when present it
/// must be a single character.
///
/// # Examples
///
/// ```
/// use argspec_core::parse_spec_string;
///
/// assert_eq!(parse_spec_string("pool_file, p"), Ok(("pool_file".to_string(), Some('p'))));
/// assert!(parse_spec_string("pool_file, pq").is_err());
/// ```
pub fn parse_spec_string(spec: &str) -> Result<(String, Option<char>), DeclarationError> {
    let invalid = || DeclarationError::InvalidSpec(spec.to_string());
    let mut parts = spec.split(',').map(str::trim);

    let long = parts.next().filter(|l| !l.is_empty()).ok_or_else(invalid)?;
    let short = match parts.next() {
        None => None,
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => return Err(invalid()),
            }
        }
    };
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok((long.to_string(), short))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec_string_trims_whitespace() {
        assert_eq!(
            parse_spec_string("  pool_file ,p "),
            Ok(("pool_file".to_string(), Some('p')))
        );
        assert_eq!(parse_spec_string("batch"), Ok(("batch".to_string(), None)));
    }

    #[test]
    fn test_parse_spec_string_rejects_malformed() {
        for bad in ["", " , p", "pool_file, pp", "pool_file,", "a, b, c"] {
            assert_eq!(
                parse_spec_string(bad),
                Err(DeclarationError::InvalidSpec(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_duplicate_long_name() {
        let mut builder = SchemaBuilder::new();
        builder.declare_value("pool_file, p").unwrap();

        assert_eq!(
            builder.declare_value("pool_file, q").unwrap_err(),
            DeclarationError::DuplicateOption("pool_file".to_string())
        );
    }

    #[test]
    fn test_duplicate_short_name() {
        let mut builder = SchemaBuilder::new();
        builder.declare_value("pool_file, p").unwrap();

        assert_eq!(
            builder.declare_optional("port, p", Some("80")).unwrap_err(),
            DeclarationError::DuplicateOption("-p".to_string())
        );
    }

    #[test]
    fn test_optional_requires_default() {
        let mut builder = SchemaBuilder::new();

        assert_eq!(
            builder.declare_optional("threads, t", None).unwrap_err(),
            DeclarationError::MissingDefault("threads".to_string())
        );
    }

    #[test]
    fn test_rejected_declaration_leaves_builder_usable() {
        let mut builder = SchemaBuilder::new();
        builder.declare_value("pool_file, p").unwrap();
        builder.declare_value("pool_file, p").unwrap_err();
        builder.declare_value("warm_file, w").unwrap();

        assert_eq!(builder.finalize().unwrap().len(), 2);
    }

    #[test]
    fn test_finalize_consumes_builder() {
        let mut builder = SchemaBuilder::new();
        builder.declare_value("pool_file, p").unwrap();
        let schema = builder.finalize().unwrap();

        assert_eq!(schema.required_names(), vec!["pool_file"]);
        assert_eq!(
            builder.declare(OptionSpec::required("batch", None)).unwrap_err(),
            DeclarationError::SchemaAlreadyFinalized
        );
        assert_eq!(
            builder.declare_optional("threads, t", Some("1")).unwrap_err(),
            DeclarationError::SchemaAlreadyFinalized
        );
        assert_eq!(
            builder.finalize().unwrap_err(),
            DeclarationError::SchemaAlreadyFinalized
        );
    }
}
