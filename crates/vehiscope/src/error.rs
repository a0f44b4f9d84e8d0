//! Error types for the vehiscope library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vehiscope operations.
#[derive(Debug, Error)]
pub enum VehiscopeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column named by a cleaning rule is not in the table.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// An imputation group had no observed value to fill with.
    #[error("No fill value available for '{column}' in group {key_column}={group}")]
    MissingFillValue {
        column: String,
        key_column: String,
        group: String,
    },

    /// A date value did not match the fixed date format.
    #[error("Date parse error in '{column}' at row {row}: '{value}' does not match {format}")]
    DateParse {
        column: String,
        row: usize,
        value: String,
        format: String,
    },

    /// A value could not be represented in the target type.
    #[error("Cannot cast '{value}' in '{column}' at row {row} to {target}")]
    TypeCast {
        column: String,
        row: usize,
        value: String,
        target: String,
    },

    /// A chart or statistic needs a numeric column.
    #[error("Column '{column}' is {found}, expected a numeric column")]
    NotNumeric { column: String, found: String },

    /// Type name in a schema document is not recognized.
    #[error("Unknown column type: {0}")]
    UnknownType(String),

    /// The data file and the schema document disagree.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Writing the cleaned export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Failure kinds of the clean-data export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The tabular data file could not be written; no schema was written.
    #[error("Failed to write data file '{path}': {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The schema document could not be written.
    #[error("Failed to write schema file '{path}': {source}")]
    SchemaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema document could not be serialized.
    #[error("Failed to serialize schema document: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Result type alias for vehiscope operations.
pub type Result<T> = std::result::Result<T, VehiscopeError>;
