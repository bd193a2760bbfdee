//! Mutual-exclusion guards for the shared resources.
//!
//! Two resources are shared between concurrent requests and protected here,
//! because the filesystem and the vendor tool protect neither: the target
//! Verilog file (a second concurrent writer would corrupt the head/body/tail
//! structure) and the physical device chain (two programmer invocations on
//! one cable is undefined behavior in the vendor tool).

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Keyed locks enforcing "one build per target file" and "one flash per
/// cable".
///
/// Constructed once at process start and threaded through to the
/// orchestrator. Lock handles are returned as `Arc<Mutex<()>>`; the caller
/// holds the guard for the duration of the protected stage:
///
/// ```
/// # use patchbay_build::ExclusionGuards;
/// # use std::path::Path;
/// let guards = ExclusionGuards::new();
/// let lock = guards.file_lock(Path::new("top.v"));
/// let _held = lock.lock().unwrap_or_else(|e| e.into_inner());
/// // ... patch and compile ...
/// ```
#[derive(Debug, Default)]
pub struct ExclusionGuards {
    files: Mutex<HashMap<std::path::PathBuf, Arc<Mutex<()>>>>,
    chains: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ExclusionGuards {
    /// Creates an empty guard registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock serializing builds of one target file.
    ///
    /// The key is the canonical path where the file exists, so two spellings
    /// of the same path share a lock.
    pub fn file_lock(&self, target: &Path) -> Arc<Mutex<()>> {
        let key = std::fs::canonicalize(target).unwrap_or_else(|_| target.to_path_buf());
        Arc::clone(
            self.files
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .entry(key)
                .or_default(),
        )
    }

    /// The lock serializing flashes through one cable.
    pub fn chain_lock(&self, cable: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.chains
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .entry(cable.to_string())
                .or_default(),
        )
    }
}
