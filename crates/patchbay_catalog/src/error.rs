//! Error types for catalog loading.

use std::path::PathBuf;

/// Errors that make the pin catalog unavailable.
///
/// Catalog errors are fatal to the request that needed the lookup; they are
/// never downgraded to per-pin skips.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// An I/O error occurred while reading a table file.
    #[error("failed to read pin table {path}: {source}")]
    Io {
        /// The table file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A table file exists but its contents are not a usable table.
    #[error("malformed pin table {path}, line {line}: {reason}")]
    Malformed {
        /// The table file that failed to parse.
        path: PathBuf,
        /// One-based line number of the offending row.
        line: usize,
        /// Description of what was wrong with the row.
        reason: String,
    },
}
