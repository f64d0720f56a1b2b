//! Error types for the migration tool.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for migration operations
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Errors that can occur while converting transaction exports.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Source file missing, not valid UTF-8, or not parsable as CSV
    #[error("Unable to read source file {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Destination file could not be created, written or moved into place
    #[error("Unable to write output file {}: {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mapping configuration missing, malformed or failing validation
    #[error("Invalid category configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Batch input directory does not exist
    #[error("Input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    /// I/O error outside of a specific source or destination file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error on an in-memory stream
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}
