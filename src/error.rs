//! Error types for mirador.

use std::path::PathBuf;

/// Result type alias for mirador operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while snapshotting or rendering a tabular source.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error while reading a template file.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON error while serializing a snapshot payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The tabular source cannot be walked.
    #[error("Malformed source: {message}")]
    Source {
        /// Description of what made the source unreadable.
        message: String,
    },

    /// Row index out of bounds when reading a source.
    #[error("Row {index} out of bounds for source with {len} rows")]
    IndexOutOfBounds {
        /// The requested row index.
        index: usize,
        /// The actual number of rows.
        len: usize,
    },

    /// Schema mismatch between columns or batches.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the schema mismatch.
        message: String,
    },

    /// Template missing, unreadable or lacking a required placeholder.
    #[error("Template error: {message}")]
    Template {
        /// Description of the template problem.
        message: String,
    },
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create a template error.
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }
}
