//! Driver for the external Quartus toolchain.
//!
//! The vendor tools are opaque external processes: `quartus_sh` compiles a
//! project into a binary image, `quartus_pgm` lists programming cables,
//! queries the device chain behind a cable, and loads an image. This crate
//! provides those four phases (compile, discover, topology check, flash) for
//! the build orchestrator to sequence. Success is decided from each process's
//! own exit status; the tools' text output is parsed only to extract
//! auxiliary data (the cable address and the chain core count), never to
//! decide success. Exactly one programmable core on the chain is supported;
//! anything else must stop the pipeline before flashing.
//!
//! All invocations go through the [`ProcessRunner`] seam so the whole state
//! machine can be exercised without Quartus installed.

#![warn(missing_docs)]

mod driver;
mod error;
mod parse;
mod runner;

pub use driver::{DeviceTopology, QuartusProject, QuartusToolchain, EXPECTED_CORES};
pub use error::ToolchainError;
pub use parse::{parse_cable_list, parse_chain_core_count};
pub use runner::{ProcessOutput, ProcessRunner, RecordedCall, ScriptedRunner, SystemRunner};
