use std::fmt;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

/// Which required piece of CI information a variable carries.
///
/// Only required values have a role: the CI flag and pull-request number are
/// queries and never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum VariableRole {
    Branch,
}

impl fmt::Display for VariableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            VariableRole::Branch => "branch name",
        };
        f.write_str(role)
    }
}

/// Errors raised by environment queries and command execution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required environment variable is not set.
    #[error("environment variable {name} ({role}) is not set")]
    MissingVariable { role: VariableRole, name: String },

    /// An argv with no program in it.
    #[error("no command given")]
    EmptyCommand,

    /// The program could not be launched (usually: not on the search path).
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("`{command}` exited with {status}")]
    Exit { command: String, status: ExitStatus },

    /// Standard output was not UTF-8.
    #[error("output of `{command}` is not valid UTF-8: {source}")]
    Decode {
        command: String,
        #[source]
        source: FromUtf8Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
