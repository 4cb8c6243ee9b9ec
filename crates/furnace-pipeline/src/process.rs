//! Child process execution.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code of the child
    pub code: i32,
    /// Everything written to stdout
    pub stdout: String,
    /// Everything written to stderr
    pub stderr: String,
}

/// Runs a command to completion.
pub trait ProcessRunner: Send + Sync {
    /// Run `command` (program followed by its arguments) inside `cwd`.
    ///
    /// Blocks until the child exits. Returns an error only when the process
    /// could not be started or waited on; a non-zero exit is a normal result.
    fn run(&self, command: &[String], cwd: &Path) -> io::Result<ProcessOutput>;
}

/// Runs commands with `std::process`.
///
/// All three standard streams are piped. Stdin is closed right after spawning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &[String], cwd: &Path) -> io::Result<ProcessOutput> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        drop(child.stdin.take());

        let output = child.wait_with_output()?;

        Ok(ProcessOutput {
            code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Map an exit status to a shell-style exit code.
///
/// Children killed by a signal report `128 + signal`, like a POSIX shell.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
