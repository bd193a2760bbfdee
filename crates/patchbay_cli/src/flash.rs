//! `patchbay flash` — load a pre-built binary image onto the device.

use patchbay_build::BuildOrchestrator;

use crate::config::load_config;
use crate::{FlashArgs, GlobalArgs};

/// Runs the `patchbay flash` command.
///
/// Skips generation and compilation entirely; the image is either given with
/// `--image` or taken from the project's compiled output location. Returns
/// exit code 0 when the device was programmed, 1 otherwise.
pub fn run(args: &FlashArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(&global.config_path())?;
    let image = args
        .image
        .clone()
        .unwrap_or_else(|| config.build_target().project.output_image());

    if !global.quiet {
        eprintln!("  Flashing {}", image.display());
    }

    let orchestrator = BuildOrchestrator::new(config.toolchain_driver());
    let report = orchestrator.flash_image(&image);

    if report.outcome.is_success() {
        if !global.quiet {
            eprintln!("    Device programmed");
        }
        Ok(0)
    } else {
        eprintln!("error: {}", report.outcome);
        Ok(1)
    }
}
