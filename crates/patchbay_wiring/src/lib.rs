//! Wiring value types shared across the patchbay pipeline.
//!
//! A wiring is an ordered list of (peripheral pin, board pin) name pairs
//! submitted by the operator. This crate owns the validated [`ConnectionSet`]
//! representation, the fail-closed shape validation that produces it, and the
//! [`SkippedConnection`] records that later pipeline stages use to report
//! pairs they could not honor.

#![warn(missing_docs)]

mod error;
mod set;

pub use error::WiringError;
pub use set::{Connection, ConnectionSet, SkipReason, SkippedConnection, WiringDocument};
