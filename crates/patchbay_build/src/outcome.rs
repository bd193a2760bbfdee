//! Terminal outcomes of a pipeline run.

use patchbay_toolchain::ToolchainError;
use patchbay_wiring::SkippedConnection;

/// The terminal result of one pipeline run.
///
/// Exactly one variant per way the pipeline can end. Toolchain failures map
/// one-to-one from [`ToolchainError`]; the diagnostic text captured from the
/// failing stage travels with the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Every requested stage finished.
    Success,
    /// The compile phase failed; discovery was never entered.
    CompileFailed {
        /// Diagnostic text captured from the compiler.
        details: String,
    },
    /// No programming cable was found.
    DeviceNotFound {
        /// Diagnostic text captured from the programmer.
        details: String,
    },
    /// The chain held the wrong number of cores; flashing was not attempted.
    TopologyMismatch {
        /// The supported core count.
        expected: usize,
        /// The count the chain reported.
        actual: usize,
    },
    /// Loading the image onto the device failed.
    ProgramFailed {
        /// Diagnostic text captured from the programmer.
        details: String,
    },
}

impl BuildOutcome {
    /// Whether the run reached its end without a stage failure.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

impl From<ToolchainError> for BuildOutcome {
    fn from(err: ToolchainError) -> Self {
        match err {
            ToolchainError::CompileFailed { details } => BuildOutcome::CompileFailed { details },
            ToolchainError::DeviceNotFound { details } => BuildOutcome::DeviceNotFound { details },
            ToolchainError::TopologyMismatch { expected, actual } => {
                BuildOutcome::TopologyMismatch { expected, actual }
            }
            ToolchainError::ProgramFailed { details } => BuildOutcome::ProgramFailed { details },
        }
    }
}

impl std::fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildOutcome::Success => write!(f, "success"),
            BuildOutcome::CompileFailed { details } => write!(f, "compilation failed: {details}"),
            BuildOutcome::DeviceNotFound { details } => {
                write!(f, "no programming cable found: {details}")
            }
            BuildOutcome::TopologyMismatch { expected, actual } => write!(
                f,
                "unsupported device chain: expected {expected} core(s), found {actual}"
            ),
            BuildOutcome::ProgramFailed { details } => write!(f, "programming failed: {details}"),
        }
    }
}

/// The full result handed back to the caller.
///
/// The skip list travels with every outcome, including `Success`: a
/// partially resolvable wiring still builds, but the caller must be able to
/// see what was left out.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// The terminal outcome.
    pub outcome: BuildOutcome,
    /// Connections the generator could not honor, in submission order.
    pub skipped: Vec<SkippedConnection>,
    /// The regenerated Verilog text, for requests that produce it.
    pub generated: Option<String>,
}

impl BuildReport {
    pub(crate) fn new(outcome: BuildOutcome, skipped: Vec<SkippedConnection>) -> Self {
        Self {
            outcome,
            skipped,
            generated: None,
        }
    }
}
