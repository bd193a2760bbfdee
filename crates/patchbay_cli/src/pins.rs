//! `patchbay pins` — list the pin catalog.

use patchbay_catalog::{PinCatalog, Side};

use crate::config::load_config;
use crate::GlobalArgs;

/// Runs the `patchbay pins` command.
///
/// Prints both tables in file order, name first. Returns exit code 0.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(&global.config_path())?;
    let catalog = PinCatalog::load(&config.data.peripheral_table, &config.data.board_table)?;

    for side in [Side::Peripheral, Side::Board] {
        println!("{side} pins:");
        for row in catalog.table(side).rows() {
            println!("  {:16} {}", row.name, row.signal);
        }
        println!();
    }
    Ok(0)
}
