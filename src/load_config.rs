use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{error, info};

use crate::config::Config;

/// Loads a YAML config file. Sections and fields left out keep their defaults
/// (Travis CI variable names, `git` on the search path, `docs/index.rst`).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    // An empty file is a valid "all defaults" config.
    if config_content.trim().is_empty() {
        let config = Config::default();
        config.trace_loaded();
        return Ok(config);
    }

    let config: Config = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML {:?}: {e}", path_ref));
        }
    };

    if config.env.in_ci.is_empty() || config.env.pull_request.is_empty() || config.env.branch.is_empty() {
        error!(config_path = ?path_ref, "Environment variable names must not be empty");
        anyhow::bail!("Environment variable names in {:?} must not be empty", path_ref);
    }

    config.trace_loaded();
    Ok(config)
}

/// The config at `path` if one was given, the defaults otherwise.
pub fn load_config_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => {
            info!("No config file given, using defaults");
            Ok(Config::default())
        }
    }
}
