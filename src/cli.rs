//! # ci-diff-helper CLI Interface (Module)
//!
//! Command parsing and output formatting for the `ci-diff-helper` binary. All the
//! actual logic lives in [`crate::env`], [`crate::git`] and [`crate::rewrite_index`];
//! this module only wires a [`Config`], an environment snapshot and a
//! [`CommandRunner`] together.
//!
//! [`dispatch`] takes its collaborators as arguments so tests can hand it an
//! injected environment and a mocked runner. [`run`] is the entrypoint `main()` uses.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::command::{CommandRunner, SystemRunner};
use crate::config::Config;
use crate::env::{CiContext, Environment};
use crate::git::Git;
use crate::load_config::load_config_or_default;
use crate::rewrite_index::rewrite_index_file;

/// CLI for ci-diff-helper: answer CI build questions from shell scripts.
#[derive(Parser)]
#[clap(
    name = "ci-diff-helper",
    version,
    about = "Query the CI environment and the checked-in files of the current repository"
)]
pub struct Cli {
    /// Path to an optional YAML config file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print `true` when running under CI, `false` otherwise
    InCi,
    /// Print `true` for a pull-request build, `false` otherwise
    IsPullRequest,
    /// Print the pull-request number; fails outside pull-request builds
    PullRequestNumber,
    /// Print the branch being built
    Branch,
    /// Print the top-level directory of the current repository
    RepoRoot,
    /// Print every checked-in file as an absolute path, one per line
    CheckedInFiles,
    /// Rewrite the sphinx-apidoc index page in place
    RewriteIndex {
        /// Index file to rewrite (defaults to the configured `docs.index_file`)
        #[clap(long)]
        file: Option<PathBuf>,
        /// Public member to list under `:members:` (repeatable)
        #[clap(long = "member")]
        members: Vec<String>,
    },
}

/// Execute one command and return what should be printed on stdout.
pub fn dispatch(
    command: &Commands,
    config: &Config,
    env: Environment,
    runner: &dyn CommandRunner,
) -> Result<String> {
    let ci = CiContext::new(env, config.env.clone());
    let git = Git::new(runner, &config.git);

    let output = match command {
        Commands::InCi => ci.in_ci().to_string(),
        Commands::IsPullRequest => ci.is_pull_request().to_string(),
        Commands::PullRequestNumber => ci
            .pull_request_number()
            .with_context(|| {
                format!("{} does not hold a 64-bit pull request number", config.env.pull_request)
            })?
            .to_string(),
        Commands::Branch => ci.branch()?.to_string(),
        Commands::RepoRoot => git
            .repository_root()
            .context("Could not determine the repository root")?,
        Commands::CheckedInFiles => git
            .checked_in_files()
            .context("Could not list checked-in files")?
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        Commands::RewriteIndex { file, members } => {
            let path = file.as_ref().unwrap_or(&config.docs.index_file);
            rewrite_index_file(path, &config.docs, members)?;
            String::new()
        }
    };
    Ok(output)
}

/// Entrypoint for main(): load config, snapshot the process environment, run.
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!(command = ?cli.command, "trace_initialised");

    let config = load_config_or_default(cli.config.as_ref())?;
    let output = dispatch(
        &cli.command,
        &config,
        Environment::from_process(),
        &SystemRunner::new(),
    )?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
