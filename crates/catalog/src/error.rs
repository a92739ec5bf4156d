//! Error types for the catalog crate.
//!
//! All loading, parsing, and validation failures are reported through
//! [`CatalogError`], with enough context (file, field, id) to point at
//! the offending master-data entry.

use thiserror::Error;

/// Errors that can occur while loading and validating master data
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A master-data file is not valid JSON (or does not match the schema)
    #[error("JSON error in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., sake pointing at an unknown brewery)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
