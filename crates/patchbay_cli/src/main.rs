//! Patchbay CLI — the operator's interface to the build-and-flash pipeline.
//!
//! Provides `patchbay generate` for rewriting the Verilog wiring section,
//! `patchbay build` for the full compile-and-flash pipeline, `patchbay flash`
//! for loading a pre-built image, and `patchbay pins` for listing the pin
//! catalog. All commands read their paths from `patchbay.toml`.

#![warn(missing_docs)]

mod build;
mod config;
mod flash;
mod generate;
mod pins;
mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// Patchbay — declare pin wiring, compile it, flash it.
#[derive(Parser, Debug)]
#[command(name = "patchbay", version, about = "FPGA pin wiring patch bay")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `patchbay.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate the wiring section of the Verilog file and print it.
    Generate(GenerateArgs),
    /// Regenerate, compile the project, and flash the device.
    Build(BuildArgs),
    /// Flash a pre-built binary image without compiling.
    Flash(FlashArgs),
    /// List the pin names of both catalog tables.
    Pins,
}

/// Arguments for the `patchbay generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Connections document to apply (defaults to `data.connections` from
    /// the configuration).
    #[arg(long)]
    pub connections: Option<PathBuf>,
}

/// Arguments for the `patchbay build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Connections document to apply (defaults to `data.connections` from
    /// the configuration).
    #[arg(long)]
    pub connections: Option<PathBuf>,
}

/// Arguments for the `patchbay flash` subcommand.
#[derive(Parser, Debug)]
pub struct FlashArgs {
    /// Binary image to load (defaults to the project's compiled output).
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// The configuration file to load: `--config` or `patchbay.toml` in the
    /// working directory.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from("patchbay.toml"))
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Build(ref args) => build::run(args, &global),
        Command::Flash(ref args) => flash::run(args, &global),
        Command::Pins => pins::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
