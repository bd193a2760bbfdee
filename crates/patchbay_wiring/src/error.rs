//! Error types for wiring submission validation.

/// Errors that can occur when validating a raw wiring submission.
///
/// Shape errors are fail-closed: one bad entry rejects the whole submission,
/// because a malformed pair is a caller-contract violation the caller can
/// always fix. Name resolution failures are handled elsewhere, per pair.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    /// An entry did not contain exactly two elements.
    #[error("connection {index} must be a pair of pin names, got {len} element(s)")]
    NotAPair {
        /// Zero-based index of the offending entry.
        index: usize,
        /// Number of elements the entry actually had.
        len: usize,
    },

    /// An entry contained an empty pin name.
    #[error("connection {index} has an empty {side} pin name")]
    EmptyName {
        /// Zero-based index of the offending entry.
        index: usize,
        /// Which half of the pair was empty ("peripheral" or "board").
        side: &'static str,
    },
}
