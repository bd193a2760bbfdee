//! Configuration types deserialized from `patchbay.toml`.
//!
//! The configuration names everything the pipeline needs to find on disk:
//! the two vendor binaries, the Quartus project, the catalog tables, the
//! target Verilog file, and (optionally) the persisted connections document.
//! Relative paths are resolved against the directory containing the
//! configuration file.

use std::path::{Path, PathBuf};

use patchbay_build::BuildTarget;
use patchbay_toolchain::{QuartusProject, QuartusToolchain};
use serde::Deserialize;

/// Errors that can occur when loading or validating a `patchbay.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),
}

/// The top-level configuration parsed from `patchbay.toml`.
#[derive(Debug, Deserialize)]
pub struct PatchbayConfig {
    /// Locations of the vendor binaries.
    pub toolchain: ToolchainConfig,
    /// The Quartus project the wiring is compiled into.
    pub project: ProjectConfig,
    /// Data files the pipeline reads and rewrites.
    pub data: DataConfig,
}

/// Locations of the vendor binaries.
#[derive(Debug, Deserialize)]
pub struct ToolchainConfig {
    /// Path to `quartus_sh`.
    pub compile_tool: PathBuf,
    /// Path to `quartus_pgm`.
    pub program_tool: PathBuf,
}

/// The Quartus project identity.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// The project directory holding the `.qpf`/`.qsf` files.
    pub dir: PathBuf,
    /// The project base name (no extension).
    pub name: String,
}

/// Data files the pipeline reads and rewrites.
#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// CSV table mapping peripheral pin names to signals.
    pub peripheral_table: PathBuf,
    /// CSV table mapping board pin names to signals.
    pub board_table: PathBuf,
    /// The Verilog file whose wiring section is regenerated.
    pub verilog: PathBuf,
    /// The persisted connections document, if the outer layer keeps one.
    #[serde(default)]
    pub connections: Option<PathBuf>,
}

/// Loads and validates a `patchbay.toml`, resolving relative paths against
/// the file's directory.
pub fn load_config(path: &Path) -> Result<PatchbayConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = load_config_from_str(&content)?;
    if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        config.resolve_against(base);
    }
    Ok(config)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies. Paths are left as
/// written.
pub fn load_config_from_str(content: &str) -> Result<PatchbayConfig, ConfigError> {
    let config: PatchbayConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &PatchbayConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.toolchain.compile_tool.as_os_str().is_empty() {
        return Err(ConfigError::MissingField(
            "toolchain.compile_tool".to_string(),
        ));
    }
    if config.toolchain.program_tool.as_os_str().is_empty() {
        return Err(ConfigError::MissingField(
            "toolchain.program_tool".to_string(),
        ));
    }
    Ok(())
}

impl PatchbayConfig {
    /// Rewrites every relative path to be relative to `base`.
    fn resolve_against(&mut self, base: &Path) {
        for path in [
            &mut self.toolchain.compile_tool,
            &mut self.toolchain.program_tool,
            &mut self.project.dir,
            &mut self.data.peripheral_table,
            &mut self.data.board_table,
            &mut self.data.verilog,
        ] {
            if path.is_relative() {
                *path = base.join(std::mem::take(path));
            }
        }
        if let Some(connections) = &mut self.data.connections {
            if connections.is_relative() {
                *connections = base.join(std::mem::take(connections));
            }
        }
    }

    /// The build target described by this configuration.
    pub fn build_target(&self) -> BuildTarget {
        BuildTarget {
            peripheral_csv: self.data.peripheral_table.clone(),
            board_csv: self.data.board_table.clone(),
            verilog: self.data.verilog.clone(),
            project: QuartusProject::new(self.project.dir.clone(), self.project.name.clone()),
        }
    }

    /// A toolchain driver over the configured vendor binaries.
    pub fn toolchain_driver(&self) -> QuartusToolchain {
        QuartusToolchain::new(
            self.toolchain.compile_tool.clone(),
            self.toolchain.program_tool.clone(),
        )
    }
}
