use crate::libs::utilities::path_helpers::expand_path;
use crate::schemas::errors::InstallError;
use crate::schemas::install_config::InstallConfig;
use crate::{log_debug, log_error, log_info};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Loads the install configuration.
///
/// `config_path` comes from `--config` (or `SWT_INSTALL_CONFIG` through clap). Without
/// one, the built-in defaults for the Eclipse download site are used. A file that is
/// named but cannot be read or parsed is an error: silently falling back to defaults
/// would install something other than what was asked for.
///
/// # Arguments
/// * `config_path`: Optional path to a YAML file; `~` and `$VARS` are expanded.
pub fn load_install_config(config_path: Option<&str>) -> Result<InstallConfig, InstallError> {
    let Some(raw_path) = config_path else {
        log_debug!("[Config] No configuration file given, using built-in defaults");
        return Ok(InstallConfig::default());
    };

    let path = expand_path(raw_path);
    let config = read_config_file(&path)?;
    log_info!(
        "[Config] Using configuration file: {}",
        path.display().to_string().cyan()
    );
    log_debug!("[Config] {:#?}", config);
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<InstallConfig, InstallError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        log_error!(
            "[Config] Failed to read {}: {}",
            path.display().to_string().red(),
            e
        );
        InstallError::io(path, e)
    })?;

    serde_yaml::from_str(&contents).map_err(|e| {
        log_error!(
            "[Config] Failed to parse {}: {}. Please check its YAML syntax.",
            path.display().to_string().red(),
            e
        );
        InstallError::Config(format!("{}: {}", path.display(), e))
    })
}
