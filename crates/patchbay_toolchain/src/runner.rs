//! The process invocation seam.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

/// Captured result of one external process run.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Whether the process reported success (exit status zero).
    pub success: bool,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

/// Runs an external program with an explicit argument vector.
///
/// The driver never builds shell command strings; every invocation passes
/// through this trait as a program path plus argument list, which closes the
/// injection channel that string-interpolated commands would open. Tests
/// substitute [`ScriptedRunner`] to exercise the pipeline without the vendor
/// tools installed.
pub trait ProcessRunner {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// `Err` means the process could not be run at all (binary missing,
    /// permission denied); a process that ran and failed is `Ok` with
    /// `success == false`.
    fn run(&self, program: &Path, args: &[String]) -> std::io::Result<ProcessOutput>;
}

/// The real runner backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> std::io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(ProcessOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// One invocation recorded by [`ScriptedRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The program that was requested.
    pub program: PathBuf,
    /// The argument vector it was given.
    pub args: Vec<String>,
}

/// A runner that replays canned responses and records every call.
///
/// Responses are consumed in push order; running past the end of the script
/// panics, which in a test points straight at the phase that should not have
/// run. The call log makes "this phase was never invoked" assertions direct.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    script: Mutex<VecDeque<std::io::Result<ProcessOutput>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    /// Creates a runner with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a completed process with the given exit disposition and output.
    pub fn push_output(&self, success: bool, stdout: &str, stderr: &str) {
        self.script.lock().unwrap().push_back(Ok(ProcessOutput {
            success,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }));
    }

    /// Queues a spawn failure (as if the binary did not exist).
    pub fn push_spawn_error(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                message.to_string(),
            )));
    }

    /// The invocations made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, program: &Path, args: &[String]) -> std::io::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted runner invoked past the end of its script")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_runner_replays_in_order() {
        let runner = ScriptedRunner::new();
        runner.push_output(true, "first", "");
        runner.push_output(false, "", "second");

        let a = runner.run(Path::new("tool"), &["x".to_string()]).unwrap();
        assert!(a.success);
        assert_eq!(a.stdout, "first");

        let b = runner.run(Path::new("tool"), &[]).unwrap();
        assert!(!b.success);
        assert_eq!(b.stderr, "second");
    }

    #[test]
    fn scripted_runner_records_calls() {
        let runner = ScriptedRunner::new();
        runner.push_output(true, "", "");
        runner
            .run(Path::new("/opt/bin/quartus_pgm"), &["-l".to_string()])
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, Path::new("/opt/bin/quartus_pgm"));
        assert_eq!(calls[0].args, vec!["-l".to_string()]);
    }

    #[test]
    fn scripted_runner_surfaces_spawn_errors() {
        let runner = ScriptedRunner::new();
        runner.push_spawn_error("no such binary");
        let err = runner.run(Path::new("tool"), &[]).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn system_runner_reports_missing_binary_as_error() {
        let err = SystemRunner
            .run(Path::new("/nonexistent/patchbay-test-tool"), &[])
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
