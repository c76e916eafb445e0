//! # command: run an external program and capture its output as text
//!
//! The [`CommandRunner`] trait is the single seam between this crate and the
//! outside world's processes. [`SystemRunner`] is the real implementation; tests
//! use the `mockall`-generated `MockCommandRunner` instead.
//!
//! Arguments are always passed as a vector, never through a shell.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::string::FromUtf8Error;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Runs `argv[0]` with `argv[1..]` as arguments and returns its standard output,
/// decoded as UTF-8 with trailing whitespace removed.
///
/// Implementations must fail with [`Error::Spawn`] when the program cannot be
/// launched, [`Error::Exit`] on a non-zero exit and [`Error::Decode`] when the
/// output is not UTF-8.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, argv: &[String]) -> Result<String>;
}

/// Spawns real child processes. Blocks until the child exits.
///
/// Standard error is inherited, so the child's diagnostics reach the caller's terminal.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    cwd: Option<PathBuf>,
}

impl SystemRunner {
    /// Runs commands in the current working directory of the process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs commands from `dir` instead of the process's working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Result<String> {
        let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;
        let command_line = argv.join(" ");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        debug!(command = %command_line, cwd = ?self.cwd, "Running command");
        let output = cmd.output().map_err(|source| {
            error!(error = ?source, program = %program, "Failed to launch command");
            Error::Spawn {
                program: program.clone(),
                source,
            }
        })?;

        if !output.status.success() {
            error!(
                command = %command_line,
                status = %output.status,
                "Command exited with non-zero status"
            );
            return Err(Error::Exit {
                command: command_line,
                status: output.status,
            });
        }

        decode_output(output.stdout).map_err(|source| Error::Decode {
            command: command_line,
            source,
        })
    }
}

/// Decode captured stdout and drop the trailing newline (and any whitespace run
/// ending the output). Leading and internal whitespace are kept.
pub fn decode_output(stdout: Vec<u8>) -> std::result::Result<String, FromUtf8Error> {
    let mut text = String::from_utf8(stdout)?;
    let kept = text.trim_end().len();
    text.truncate(kept);
    Ok(text)
}
