use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::env::EnvVarNames;
use crate::git::GitConfig;
use crate::rewrite_index::IndexLayout;

/// Everything the helper can be configured with. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub env: EnvVarNames,
    pub git: GitConfig,
    pub docs: IndexLayout,
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(
            in_ci_var = %self.env.in_ci,
            pull_request_var = %self.env.pull_request,
            branch_var = %self.env.branch,
            git = %self.git.program,
            "Loaded Config"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}
