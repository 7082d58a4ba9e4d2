use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = ".geo-optimizer.toml";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Looks for `.geo-optimizer.toml` in a directory
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Loads the project configuration
///
/// An explicit path must exist. Without one, the file is looked up in `dir`
/// and defaults are used when it is absent.
///
/// # Arguments
///
/// * `explicit` - Path passed with `--config`, if any
/// * `dir` - Directory searched when no explicit path is given
pub fn load_project_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => match find_config_file(dir) {
            Some(path) => {
                tracing::debug!("Using project config {}", path.display());
                load_config(&path)
            }
            None => Ok(Config::default()),
        },
    }
}
