//! Error types for Verilog patching.

use std::path::PathBuf;

/// Errors that abort a patch before anything is written.
///
/// The patcher is all-or-nothing: any of these leaves the target file exactly
/// as it was found.
#[derive(Debug, thiserror::Error)]
pub enum HdlError {
    /// The source text is missing a structural anchor.
    #[error("malformed hardware description: {reason}")]
    MalformedSource {
        /// Which anchor was missing or misplaced.
        reason: String,
    },

    /// An I/O error occurred while reading or replacing the target file.
    #[error("failed to patch {path}: {source}")]
    Io {
        /// The target file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
