//! Error types for declaration file operations.
//!
//! Covers I/O, serialization, unsupported file formats, and declarations
//! that load fine but describe an invalid schema.

use argspec_core::DeclarationError;
use thiserror::Error;

/// Errors that can occur while loading, saving, or compiling declarations.
#[derive(Debug, Error)]
pub enum DeclarationFileError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File extension is neither YAML nor JSON.
    #[error("unsupported declaration format: {0}")]
    UnsupportedFormat(String),

    /// The declaration describes an invalid schema.
    #[error("invalid declaration: {0}")]
    Declaration(#[from] DeclarationError),
}

/// Convenience alias for results with [`DeclarationFileError`].
pub type Result<T> = std::result::Result<T, DeclarationFileError>;
