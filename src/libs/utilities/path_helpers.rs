// Path resolution for user-supplied and default locations.

use crate::log_debug;
use crate::schemas::errors::InstallError;
use colored::Colorize;
use std::path::PathBuf;

/// Expands `~` and `$VARS` in a user-supplied path.
///
/// If an environment variable is undefined the path is returned with only the tilde
/// expanded, so a literal `$` in a directory name still works.
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            log_debug!(
                "[Paths] Could not expand variables in '{}': {}. Expanding '~' only.",
                path,
                e
            );
            PathBuf::from(shellexpand::tilde(path).as_ref())
        }
    }
}

/// `~/Downloads`, where every archive is extracted unless configured otherwise.
pub fn default_downloads_dir() -> Result<PathBuf, InstallError> {
    let home = dirs::home_dir().ok_or_else(|| {
        InstallError::Config("could not determine the home directory".to_string())
    })?;
    let downloads = home.join("Downloads");
    log_debug!(
        "[Paths] Downloads directory resolved to {}",
        downloads.display().to_string().cyan()
    );
    Ok(downloads)
}

/// Picks the downloads directory: CLI flag, then config file, then `~/Downloads`.
pub fn resolve_downloads_dir(
    cli_value: Option<&str>,
    config_value: Option<&str>,
) -> Result<PathBuf, InstallError> {
    match cli_value.or(config_value) {
        Some(dir) => Ok(expand_path(dir)),
        None => default_downloads_dir(),
    }
}
