//! ci-diff-helper: environment and repository queries for CI scripts.
//!
//! Answers the questions a CI script usually asks before deciding what to lint,
//! test or publish: are we on CI, is this a pull-request build, which branch is
//! being built, and which files are checked in.
//!
//! Environment reads go through an injected [`env::Environment`] snapshot and
//! subprocess calls go through the [`command::CommandRunner`] trait, so both can
//! be replaced in tests.

pub mod cli;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod git;
pub mod load_config;
pub mod rewrite_index;

pub use cli::{run, Cli, Commands};
pub use command::{CommandRunner, SystemRunner};
pub use env::{CiContext, EnvVarNames, Environment};
pub use error::{Error, Result, VariableRole};
