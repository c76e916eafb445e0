//! Repository introspection built on [`CommandRunner`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::CommandRunner;
use crate::error::Result;

/// Which version-control executable to invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

/// Git queries executed through a [`CommandRunner`].
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &GitConfig) -> Self {
        Self {
            runner,
            program: config.program.clone(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let argv: Vec<String> = std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();
        self.runner.run(&argv)
    }

    /// Top-level directory of the current repository, exactly as git prints it.
    pub fn repository_root(&self) -> Result<String> {
        self.run(&["rev-parse", "--show-toplevel"])
    }

    /// Every tracked file as an absolute path, in `ls-files` order.
    ///
    /// `--full-name` keeps the listing relative to the root whatever the
    /// working directory is.
    pub fn checked_in_files(&self) -> Result<Vec<PathBuf>> {
        let root = self.repository_root()?;
        let listing = self.run(&["ls-files", "--full-name", &root])?;
        let files: Vec<PathBuf> = listing
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| PathBuf::from(&root).join(line))
            .collect();
        debug!(root = %root, count = files.len(), "Listed checked-in files");
        Ok(files)
    }
}

/// [`Git::repository_root`] with the default `git` executable.
pub fn repository_root(runner: &dyn CommandRunner) -> Result<String> {
    Git::new(runner, &GitConfig::default()).repository_root()
}

/// [`Git::checked_in_files`] with the default `git` executable.
pub fn checked_in_files(runner: &dyn CommandRunner) -> Result<Vec<PathBuf>> {
    Git::new(runner, &GitConfig::default()).checked_in_files()
}
