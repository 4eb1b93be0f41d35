//! Serializable option declarations.
//!
//! A declaration file lists the options a program accepts using the same
//! `"long_name, short_name"` spec strings as
//! [`SchemaBuilder`](argspec_core::SchemaBuilder). An entry with a default is
//! optional; an entry without one is required.
//!
//! # Example YAML
//!
//! ```yaml
//! name: dalea-bench
//! description: Persistent hash table benchmark
//! options:
//!   - spec: pool_file, p
//!     description: Pool file to create
//!   - spec: warm_file, w
//!   - spec: run_file, r
//!   - spec: threads, t
//!     default: "1"
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use argspec_core::{
    DeclarationError, OptionSpec, Schema, parse_spec_string, validate_options,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DeclarationFileError, Result};

/// One option entry in a declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// `"long_name, short_name"` spec string.
    pub spec: String,
    /// Default value; present exactly on optional options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Explicit required marker. When absent, inferred from `default`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionEntry {
    /// Creates a required entry.
    pub fn value(spec: &str) -> Self {
        Self {
            spec: spec.to_string(),
            default: None,
            required: None,
            description: None,
        }
    }

    /// Creates an optional entry with a default.
    pub fn optional(spec: &str, default: &str) -> Self {
        Self {
            default: Some(default.to_string()),
            ..Self::value(spec)
        }
    }

    /// Converts the entry into an option descriptor.
    ///
    /// # Errors
    ///
    /// [`DeclarationError::InvalidSpec`] for a malformed spec string,
    /// [`DeclarationError::MissingDefault`] for an entry marked
    /// `required: false` with no default.
    pub fn to_option(&self) -> std::result::Result<OptionSpec, DeclarationError> {
        let (long, short) = parse_spec_string(&self.spec)?;
        let required = self.required.unwrap_or(self.default.is_none());
        let spec = OptionSpec {
            long_name: long,
            short_name: short,
            required,
            default: self.default.clone(),
            description: self.description.clone(),
        };
        Ok(spec)
    }
}

/// A named list of option entries, loadable from YAML or JSON.
///
/// # Examples
///
/// ```
/// use argspec_declarations::Declaration;
///
/// let yaml = r#"
/// name: bench
/// options:
///   - spec: pool_file, p
///   - spec: threads, t
///     default: "1"
/// "#;
/// let declaration = Declaration::from_yaml_str(yaml).unwrap();
/// let schema = declaration.to_schema().unwrap();
/// assert_eq!(schema.required_names(), vec!["pool_file"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Program or declaration name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Option entries in declaration order.
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

impl Declaration {
    /// Loads a declaration, choosing the format from the file extension.
    ///
    /// `.yaml` and `.yml` are read as YAML, `.json` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](DeclarationFileError::UnsupportedFormat)
    /// for other extensions, [`IoError`](DeclarationFileError::IoError) if the
    /// file cannot be read, or the matching parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let declaration: Self = match format {
            FileFormat::Yaml => serde_yaml::from_reader(reader)?,
            FileFormat::Json => serde_json::from_reader(reader)?,
        };
        debug!(
            path = %path.display(),
            options = declaration.options.len(),
            "loaded declaration"
        );
        Ok(declaration)
    }

    /// Saves the declaration, choosing the format from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        match format {
            FileFormat::Yaml => serde_yaml::to_writer(writer, self)?,
            FileFormat::Json => serde_json::to_writer_pretty(writer, self)?,
        }
        Ok(())
    }

    /// Parses a declaration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a declaration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compiles the declaration into a [`Schema`].
    ///
    /// # Errors
    ///
    /// Returns [`Declaration`](DeclarationFileError::Declaration) with the
    /// first problem found.
    pub fn to_schema(&self) -> Result<Schema> {
        let options = self
            .options
            .iter()
            .map(OptionEntry::to_option)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Schema::from_options(options)?)
    }

    /// Checks every entry and returns all problems found.
    pub fn validate(&self) -> Vec<DeclarationError> {
        let mut errors = Vec::new();
        let mut options = Vec::new();
        for entry in &self.options {
            match entry.to_option() {
                Ok(option) => options.push(option),
                Err(err) => errors.push(err),
            }
        }
        errors.extend(validate_options(&options));
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(DeclarationFileError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}
