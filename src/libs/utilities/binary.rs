// Locating external executables.

use crate::schemas::errors::InstallError;
use crate::log_debug;
use colored::Colorize;
use std::path::PathBuf;

/// Finds `program` on `PATH`.
///
/// # Returns
/// * `Ok(PathBuf)` with the absolute path of the executable.
/// * `Err(InstallError::MissingCommand)` when no executable of that name is on `PATH`.
pub fn locate_install_tool(program: &str) -> Result<PathBuf, InstallError> {
    match which::which(program) {
        Ok(path) => {
            log_debug!(
                "[Tools] Found '{}' at {}",
                program,
                path.display().to_string().cyan()
            );
            Ok(path)
        }
        Err(e) => {
            log_debug!("[Tools] PATH lookup for '{}' failed: {}", program.red(), e);
            Err(InstallError::MissingCommand(program.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_reported_by_name() {
        let err = locate_install_tool("swt-install-no-such-program").unwrap_err();
        match err {
            InstallError::MissingCommand(name) => assert_eq!(name, "swt-install-no-such-program"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn finds_a_program_that_is_always_there() {
        let path = locate_install_tool("sh").unwrap();
        assert!(path.is_absolute());
    }
}
