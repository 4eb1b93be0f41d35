//! The finalized, immutable option schema.

use serde::{Deserialize, Serialize};

use crate::{DeclarationError, OptionSpec, SchemaBuilder};

/// Ordered, validated set of option descriptors.
///
/// A `Schema` is produced by [`SchemaBuilder::finalize`] or
/// [`Schema::from_options`] and never changes afterwards, so one instance can
/// be shared read-only across any number of parse calls and threads.
///
/// Deserialization goes through the same validation as the builder.
///
/// # Examples
///
/// ```
/// use argspec_core::{OptionSpec, Schema};
///
/// let schema = Schema::from_options(vec![
///     OptionSpec::required("pool_file", Some('p')),
///     OptionSpec::optional("threads", Some('t'), "1"),
/// ])
/// .unwrap();
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.find_flag("-t").unwrap().long_name, "threads");
/// assert_eq!(schema.required_names(), vec!["pool_file"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OptionSpec>", into = "Vec<OptionSpec>")]
pub struct Schema {
    options: Vec<OptionSpec>,
}

impl Schema {
    /// Wraps options that have already passed builder validation.
    pub(crate) fn from_validated(options: Vec<OptionSpec>) -> Self {
        Self { options }
    }

    /// Builds a schema from a plain list of descriptors, validating eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first [`DeclarationError`] encountered, in declaration
    /// order.
    pub fn from_options(options: Vec<OptionSpec>) -> Result<Self, DeclarationError> {
        let mut builder = SchemaBuilder::new();
        for spec in options {
            builder.declare(spec)?;
        }
        builder.finalize()
    }

    /// Returns the options in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Returns the number of declared options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no options are declared.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Finds an option by long name (without dashes).
    pub fn find_long(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.long_name == name)
    }

    /// Finds an option by short alias.
    pub fn find_short(&self, short: char) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.short_name == Some(short))
    }

    /// Finds an option by a raw flag token (`--name` or `-x`).
    pub fn find_flag(&self, token: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.matches(token))
    }

    /// Long names of all required options, in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.required)
            .map(|o| o.long_name.as_str())
            .collect()
    }
}

impl TryFrom<Vec<OptionSpec>> for Schema {
    type Error = DeclarationError;

    fn try_from(options: Vec<OptionSpec>) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}

impl From<Schema> for Vec<OptionSpec> {
    fn from(schema: Schema) -> Self {
        schema.options
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a OptionSpec;
    type IntoIter = std::slice::Iter<'a, OptionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
