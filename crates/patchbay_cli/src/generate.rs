//! `patchbay generate` — regenerate the wiring section without building.

use patchbay_build::BuildOrchestrator;

use crate::config::load_config;
use crate::pipeline::{load_connections, report_skipped};
use crate::{GenerateArgs, GlobalArgs};

/// Runs the `patchbay generate` command.
///
/// Patches the Verilog file from the connections document and prints the
/// regenerated text on stdout. Skipped pairs are warnings, not failures.
/// Returns exit code 0 on success.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(&global.config_path())?;
    let connections_path = args
        .connections
        .clone()
        .or_else(|| config.data.connections.clone())
        .ok_or("no connections document: pass --connections or set data.connections")?;
    let connections = load_connections(&connections_path)?;

    let target = config.build_target();
    if !global.quiet {
        eprintln!("  Patching {}", target.verilog.display());
    }

    let orchestrator = BuildOrchestrator::new(config.toolchain_driver());
    let report = orchestrator.generate(&target, &connections)?;
    report_skipped(&report.skipped);

    if let Some(text) = &report.generated {
        print!("{text}");
    }
    if !global.quiet {
        eprintln!(
            "  Regenerated {} connection(s), {} skipped",
            connections.len() - report.skipped.len(),
            report.skipped.len()
        );
    }
    Ok(0)
}
