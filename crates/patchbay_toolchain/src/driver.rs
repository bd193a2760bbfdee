//! The four-phase Quartus driver.

use std::path::{Path, PathBuf};

use crate::error::ToolchainError;
use crate::parse::{parse_cable_list, parse_chain_core_count};
use crate::runner::{ProcessOutput, ProcessRunner, SystemRunner};

/// The only chain topology this pipeline programs.
///
/// Hard-coded policy, not a per-call knob: flashing a chain with several
/// cores would need an explicit device index, and picking one silently is
/// unsafe.
pub const EXPECTED_CORES: usize = 1;

/// A Quartus project on disk, identified by its directory and base name.
///
/// The vendor file layout is fixed: `<dir>/<name>.qpf` (project),
/// `<dir>/<name>.qsf` (settings), and the compiled image at
/// `<dir>/output_files/<name>.sof`.
#[derive(Debug, Clone)]
pub struct QuartusProject {
    dir: PathBuf,
    name: String,
}

impl QuartusProject {
    /// Creates a project handle from its directory and base name.
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// The project base name (no extension).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path to the `.qpf` project file.
    pub fn project_file(&self) -> PathBuf {
        self.dir.join(format!("{}.qpf", self.name))
    }

    /// Path to the `.qsf` settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.dir.join(format!("{}.qsf", self.name))
    }

    /// Path where compilation leaves the binary image.
    pub fn output_image(&self) -> PathBuf {
        self.dir
            .join("output_files")
            .join(format!("{}.sof", self.name))
    }
}

/// What the programmer reported about the attached hardware.
///
/// Ephemeral: recomputed on every flash attempt, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTopology {
    /// The cable address token (e.g. `USB-Blaster [1-1.5]`).
    pub cable: String,
    /// Number of programmable cores visible on the chain.
    pub cores: usize,
}

impl DeviceTopology {
    /// Checks that the chain holds exactly the supported core count.
    pub fn ensure_single_core(&self) -> Result<(), ToolchainError> {
        if self.cores != EXPECTED_CORES {
            return Err(ToolchainError::TopologyMismatch {
                expected: EXPECTED_CORES,
                actual: self.cores,
            });
        }
        Ok(())
    }
}

/// Handle to the two vendor binaries.
///
/// Constructed once at startup from explicit paths and threaded through call
/// parameters; nothing is read from the environment.
#[derive(Debug)]
pub struct QuartusToolchain<R = SystemRunner> {
    compile_tool: PathBuf,
    program_tool: PathBuf,
    runner: R,
}

impl QuartusToolchain<SystemRunner> {
    /// Creates a driver over the real process runner.
    ///
    /// `compile_tool` is the `quartus_sh` binary, `program_tool` is
    /// `quartus_pgm`.
    pub fn new(compile_tool: impl Into<PathBuf>, program_tool: impl Into<PathBuf>) -> Self {
        Self::with_runner(compile_tool, program_tool, SystemRunner)
    }
}

impl<R: ProcessRunner> QuartusToolchain<R> {
    /// Creates a driver over a caller-supplied process runner.
    pub fn with_runner(
        compile_tool: impl Into<PathBuf>,
        program_tool: impl Into<PathBuf>,
        runner: R,
    ) -> Self {
        Self {
            compile_tool: compile_tool.into(),
            program_tool: program_tool.into(),
            runner,
        }
    }

    /// The underlying process runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Compiles the project into a binary image.
    ///
    /// Runs `quartus_sh --flow compile <qpf> -c <qsf>`. Success is solely the
    /// process exit status; the tool's output is captured for diagnostics.
    pub fn compile(&self, project: &QuartusProject) -> Result<(), ToolchainError> {
        log::info!("compiling project {}", project.name());
        let args = vec![
            "--flow".to_string(),
            "compile".to_string(),
            project.project_file().display().to_string(),
            "-c".to_string(),
            project.settings_file().display().to_string(),
        ];
        let output = self
            .runner
            .run(&self.compile_tool, &args)
            .map_err(|e| ToolchainError::CompileFailed {
                details: spawn_details(&self.compile_tool, &e),
            })?;
        log::debug!("compiler output:\n{}", output.stdout);
        if !output.success {
            return Err(ToolchainError::CompileFailed {
                details: failure_details(&output),
            });
        }
        log::info!("compilation of {} finished", project.name());
        Ok(())
    }

    /// Finds the first attached programming cable.
    ///
    /// Runs `quartus_pgm -l` and scans the listing for a cable token. A
    /// non-success exit or a listing without any cable yields
    /// [`ToolchainError::DeviceNotFound`].
    pub fn discover_cable(&self) -> Result<String, ToolchainError> {
        let output = self
            .runner
            .run(&self.program_tool, &["-l".to_string()])
            .map_err(|e| ToolchainError::DeviceNotFound {
                details: spawn_details(&self.program_tool, &e),
            })?;
        if !output.success {
            return Err(ToolchainError::DeviceNotFound {
                details: failure_details(&output),
            });
        }
        let cable = parse_cable_list(&output.stdout).ok_or_else(|| {
            ToolchainError::DeviceNotFound {
                details: "no cable in programmer listing".to_string(),
            }
        })?;
        log::info!("found programming cable: {cable}");
        Ok(cable)
    }

    /// Queries the device chain behind a cable.
    ///
    /// Runs `quartus_pgm -c <cable> -a` and counts the devices it reports.
    pub fn scan_chain(&self, cable: &str) -> Result<DeviceTopology, ToolchainError> {
        let args = vec!["-c".to_string(), cable.to_string(), "-a".to_string()];
        let output = self
            .runner
            .run(&self.program_tool, &args)
            .map_err(|e| ToolchainError::DeviceNotFound {
                details: spawn_details(&self.program_tool, &e),
            })?;
        if !output.success {
            return Err(ToolchainError::DeviceNotFound {
                details: failure_details(&output),
            });
        }
        let cores = parse_chain_core_count(&output.stdout);
        log::info!("chain on {cable} reports {cores} core(s)");
        Ok(DeviceTopology {
            cable: cable.to_string(),
            cores,
        })
    }

    /// Loads a binary image onto the device behind `cable`.
    ///
    /// Runs `quartus_pgm -m JTAG -c <cable> -o p;<image>`. Success is solely
    /// the process exit status.
    pub fn flash(&self, cable: &str, image: &Path) -> Result<(), ToolchainError> {
        if !image.is_file() {
            return Err(ToolchainError::ProgramFailed {
                details: format!("binary image {} does not exist", image.display()),
            });
        }
        log::info!("flashing {} via {cable}", image.display());
        let args = vec![
            "-m".to_string(),
            "JTAG".to_string(),
            "-c".to_string(),
            cable.to_string(),
            "-o".to_string(),
            format!("p;{}", image.display()),
        ];
        let output = self
            .runner
            .run(&self.program_tool, &args)
            .map_err(|e| ToolchainError::ProgramFailed {
                details: spawn_details(&self.program_tool, &e),
            })?;
        log::debug!("programmer output:\n{}", output.stdout);
        if !output.success {
            return Err(ToolchainError::ProgramFailed {
                details: failure_details(&output),
            });
        }
        log::info!("device programmed successfully");
        Ok(())
    }
}

fn spawn_details(program: &Path, err: &std::io::Error) -> String {
    format!("failed to run {}: {err}", program.display())
}

fn failure_details(output: &ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    "tool exited with a failure status and no output".to_string()
}
