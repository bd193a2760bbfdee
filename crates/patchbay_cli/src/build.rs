//! `patchbay build` — the full pipeline from wiring document to programmed
//! device.
//!
//! Chains generation, compilation, cable discovery, the chain topology
//! check, and flashing. The first failed stage terminates the run; the
//! committed Verilog patch is kept either way.

use patchbay_build::BuildOrchestrator;

use crate::config::load_config;
use crate::pipeline::{load_connections, report_skipped};
use crate::{BuildArgs, GlobalArgs};

/// Runs the `patchbay build` command.
///
/// Returns exit code 0 when every stage finished, 1 when a stage failed.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(&global.config_path())?;
    let connections_path = args
        .connections
        .clone()
        .or_else(|| config.data.connections.clone())
        .ok_or("no connections document: pass --connections or set data.connections")?;
    let connections = load_connections(&connections_path)?;

    let target = config.build_target();
    if !global.quiet {
        eprintln!("  Building {}", target.project.name());
        eprintln!("  Patching {}", target.verilog.display());
        eprintln!(" Compiling {}", target.project.project_file().display());
    }

    let orchestrator = BuildOrchestrator::new(config.toolchain_driver());
    let report = orchestrator.build(&target, &connections)?;
    report_skipped(&report.skipped);

    if report.outcome.is_success() {
        if !global.quiet {
            eprintln!("   Flashed {}", target.project.output_image().display());
        }
        Ok(0)
    } else {
        eprintln!("error: {}", report.outcome);
        Ok(1)
    }
}
