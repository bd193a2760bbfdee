//! Sequencing of the pipeline stages.

use std::path::{Path, PathBuf};

use patchbay_catalog::{CatalogError, PinCatalog};
use patchbay_hdl::HdlError;
use patchbay_toolchain::{ProcessRunner, QuartusProject, QuartusToolchain};
use patchbay_wiring::ConnectionSet;

use crate::guards::ExclusionGuards;
use crate::outcome::{BuildOutcome, BuildReport};

/// Errors raised before the pipeline produces any outcome.
///
/// These are the abort-and-touch-nothing failures: the catalog could not be
/// loaded or the target file is structurally unusable. Toolchain-stage
/// failures are not errors at this level — they are [`BuildOutcome`]
/// variants, because by then the patch is already committed and the caller
/// needs the partial result.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The pin catalog was missing or malformed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The target Verilog file could not be patched.
    #[error(transparent)]
    Hdl(#[from] HdlError),
}

/// Everything a request needs to know about its target.
#[derive(Debug, Clone)]
pub struct BuildTarget {
    /// CSV table mapping peripheral pin names to signals.
    pub peripheral_csv: PathBuf,
    /// CSV table mapping board pin names to signals.
    pub board_csv: PathBuf,
    /// The Verilog file whose wiring section is regenerated.
    pub verilog: PathBuf,
    /// The Quartus project built from that file.
    pub project: QuartusProject,
}

/// Composes catalog, patcher, and toolchain into single-request operations.
///
/// Holds the toolchain driver and the exclusion guards; both are constructed
/// once at process start and passed in, never reached through globals.
#[derive(Debug)]
pub struct BuildOrchestrator<R> {
    toolchain: QuartusToolchain<R>,
    guards: ExclusionGuards,
}

impl<R: ProcessRunner> BuildOrchestrator<R> {
    /// Creates an orchestrator over the given toolchain driver.
    pub fn new(toolchain: QuartusToolchain<R>) -> Self {
        Self {
            toolchain,
            guards: ExclusionGuards::new(),
        }
    }

    /// Regenerates the wiring section without touching the toolchain.
    ///
    /// Returns the full regenerated text and the skip list. Holds the target
    /// file's lock for the duration of the rewrite.
    pub fn generate(
        &self,
        target: &BuildTarget,
        connections: &ConnectionSet,
    ) -> Result<BuildReport, BuildError> {
        let file_lock = self.guards.file_lock(&target.verilog);
        let _held = file_lock.lock().unwrap_or_else(|e| e.into_inner());

        let patch = self.patch_locked(target, connections)?;
        let mut report = BuildReport::new(BuildOutcome::Success, patch.skipped);
        report.generated = Some(patch.text);
        Ok(report)
    }

    /// Runs the full pipeline: regenerate, compile, discover, check the
    /// chain, flash.
    ///
    /// The first failed toolchain stage terminates the run with its outcome
    /// variant; the committed patch is not rolled back, since the generated
    /// wiring is valid even when the external build fails. Skipped pairs are
    /// reported alongside every outcome.
    pub fn build(
        &self,
        target: &BuildTarget,
        connections: &ConnectionSet,
    ) -> Result<BuildReport, BuildError> {
        let file_lock = self.guards.file_lock(&target.verilog);
        let _held = file_lock.lock().unwrap_or_else(|e| e.into_inner());

        let patch = self.patch_locked(target, connections)?;
        let skipped = patch.skipped;

        if let Err(e) = self.toolchain.compile(&target.project) {
            return Ok(BuildReport::new(e.into(), skipped));
        }

        let outcome = self.flash_locked(&target.project.output_image());
        Ok(BuildReport::new(outcome, skipped))
    }

    /// Flashes a pre-built binary image, skipping generation and compilation.
    pub fn flash_image(&self, image: &Path) -> BuildReport {
        BuildReport::new(self.flash_locked(image), Vec::new())
    }

    /// Patch step shared by `generate` and `build`. Caller holds the file
    /// lock.
    fn patch_locked(
        &self,
        target: &BuildTarget,
        connections: &ConnectionSet,
    ) -> Result<patchbay_hdl::PatchResult, BuildError> {
        let catalog = PinCatalog::load(&target.peripheral_csv, &target.board_csv)?;
        let patch = patchbay_hdl::patch_file(&target.verilog, connections, &catalog)?;
        if !patch.skipped.is_empty() {
            log::warn!(
                "{} of {} wiring pair(s) not generated",
                patch.skipped.len(),
                connections.len()
            );
        }
        Ok(patch)
    }

    /// The programming half: discover, then scan, verify, and flash under
    /// the cable's lock.
    fn flash_locked(&self, image: &Path) -> BuildOutcome {
        let cable = match self.toolchain.discover_cable() {
            Ok(cable) => cable,
            Err(e) => return e.into(),
        };

        let chain_lock = self.guards.chain_lock(&cable);
        let _held = chain_lock.lock().unwrap_or_else(|e| e.into_inner());

        let topology = match self.toolchain.scan_chain(&cable) {
            Ok(topology) => topology,
            Err(e) => return e.into(),
        };
        if let Err(e) = topology.ensure_single_core() {
            return e.into();
        }
        match self.toolchain.flash(&cable, image) {
            Ok(()) => BuildOutcome::Success,
            Err(e) => e.into(),
        }
    }
}
