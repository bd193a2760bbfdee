//! Error types for toolchain phases.

/// A failed toolchain phase.
///
/// Each variant names the phase that failed and carries the diagnostic text
/// captured from the vendor tool, surfaced verbatim to the caller. The first
/// failed phase terminates the pipeline; later phases are never attempted.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// The compile phase failed (non-zero exit or the tool did not start).
    #[error("compilation failed: {details}")]
    CompileFailed {
        /// Captured diagnostic text from the compiler.
        details: String,
    },

    /// No programming cable was found on the host.
    #[error("no programming cable found: {details}")]
    DeviceNotFound {
        /// Captured diagnostic text from the programmer.
        details: String,
    },

    /// The device chain does not hold exactly the supported number of cores.
    #[error("unsupported device chain: expected {expected} core(s), found {actual}")]
    TopologyMismatch {
        /// The supported core count.
        expected: usize,
        /// The core count reported by the chain query.
        actual: usize,
    },

    /// The flash phase failed (non-zero exit or the tool did not start).
    #[error("programming failed: {details}")]
    ProgramFailed {
        /// Captured diagnostic text from the programmer.
        details: String,
    },
}
