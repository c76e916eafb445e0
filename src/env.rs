//! # env: typed queries over a snapshot of CI environment variables
//!
//! [`Environment`] holds the variables as they were when the snapshot was taken;
//! nothing here reads `std::env` after construction. [`CiContext`] pairs a snapshot
//! with the [`EnvVarNames`] of the CI provider and answers the actual questions.
//!
//! Two kinds of accessors exist:
//! - queries (`in_ci`, `is_pull_request`) where an absent or malformed value is a
//!   plain `false`;
//! - required values (`branch`) where absence is an [`Error::MissingVariable`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result, VariableRole};

/// An immutable name → value mapping of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    ///
    /// Entries whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(name, value)| {
                Some((name.into_string().ok()?, value.into_string().ok()?))
            })
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs, e.g. in tests.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Names of the variables a CI provider sets. Defaults are Travis CI's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVarNames {
    /// Set to `in_ci_value` when running under CI.
    pub in_ci: String,
    /// Exact, case-sensitive token `in_ci` must hold.
    pub in_ci_value: String,
    /// Pull-request number; anything non-numeric means "not a PR build".
    pub pull_request: String,
    /// Branch being built.
    pub branch: String,
}

impl Default for EnvVarNames {
    fn default() -> Self {
        Self {
            in_ci: "TRAVIS".to_string(),
            in_ci_value: "true".to_string(),
            pull_request: "TRAVIS_PULL_REQUEST".to_string(),
            branch: "TRAVIS_BRANCH".to_string(),
        }
    }
}

/// CI queries bound to one environment snapshot.
#[derive(Debug, Clone)]
pub struct CiContext {
    env: Environment,
    names: EnvVarNames,
}

impl CiContext {
    pub fn new(env: Environment, names: EnvVarNames) -> Self {
        Self { env, names }
    }

    /// Context over the process environment with the default variable names.
    pub fn from_process() -> Self {
        Self::new(Environment::from_process(), EnvVarNames::default())
    }

    /// True iff the CI flag variable holds exactly the configured token.
    pub fn in_ci(&self) -> bool {
        let value = self.env.get(&self.names.in_ci);
        debug!(var = %self.names.in_ci, ?value, "Checking CI flag");
        value == Some(self.names.in_ci_value.as_str())
    }

    /// The pull-request number, if the variable is set to an integer that fits
    /// in an `i64`. Larger integers still count for [`Self::is_pull_request`].
    pub fn pull_request_number(&self) -> Option<i64> {
        let raw = self.env.get(&self.names.pull_request)?;
        let parsed = parse_pull_request(raw);
        debug!(var = %self.names.pull_request, raw, ?parsed, "Parsed pull request number");
        parsed
    }

    /// True iff the pull-request variable holds a base-10 integer of any size.
    pub fn is_pull_request(&self) -> bool {
        self.env
            .get(&self.names.pull_request)
            .is_some_and(is_decimal_integer)
    }

    /// The branch being built. Unlike the queries above, absence is an error.
    pub fn branch(&self) -> Result<&str> {
        self.env
            .get(&self.names.branch)
            .ok_or_else(|| Error::MissingVariable {
                role: VariableRole::Branch,
                name: self.names.branch.clone(),
            })
    }
}

/// Base-10 integer with optional sign; surrounding whitespace is ignored.
fn is_decimal_integer(raw: &str) -> bool {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_pull_request(raw: &str) -> Option<i64> {
    if !is_decimal_integer(raw) {
        return None;
    }
    raw.trim().parse().ok()
}
