//! # Maven Installer
//!
//! Registers an extracted `swt.jar` in the project-local Maven repository with
//! `mvn install:install-file`. Unlike a bare shell call, the exit status is checked:
//! a failed install is an error, not a silent success.

use crate::schemas::errors::InstallError;
use crate::{log_debug, log_error, log_info};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Directory under the git clone root that serves as the Maven local repository.
pub const LOCAL_REPO_DIR: &str = "local-proj-repo";

pub fn local_repo_dir(repo_root: &Path) -> PathBuf {
    repo_root.join(LOCAL_REPO_DIR)
}

/// One `install:install-file` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenInstall {
    pub jar: PathBuf,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub local_repo: PathBuf,
}

impl MavenInstall {
    /// Arguments passed to the install tool, goal first.
    pub fn args(&self) -> Vec<String> {
        vec![
            "install:install-file".to_string(),
            format!("-Dfile={}", self.jar.display()),
            format!("-DgroupId={}", self.group_id),
            format!("-DartifactId={}", self.artifact_id),
            format!("-Dversion={}", self.version),
            "-Dpackaging=jar".to_string(),
            format!("-Dmaven.repo.local={}", self.local_repo.display()),
        ]
    }

    /// Human-readable command line, for logs and `--dry-run`.
    pub fn command_line(&self, tool: &str) -> String {
        std::iter::once(tool.to_string())
            .chain(self.args())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs `tool` with [`Self::args`], inheriting stdout/stderr so Maven's own output
    /// is visible.
    pub fn run(&self, tool: &Path) -> Result<(), InstallError> {
        let command_line = self.command_line(&tool.display().to_string());
        log_info!(
            "[Maven] Installing {}:{}:{}",
            self.group_id,
            self.artifact_id.bold(),
            self.version
        );
        log_debug!("[Maven] Executing: {}", command_line.dimmed());

        let status = Command::new(tool)
            .args(self.args())
            .status()
            .map_err(|e| InstallError::io(tool, e))?;

        if !status.success() {
            log_error!(
                "[Maven] {} failed with {}",
                self.artifact_id.red(),
                status
            );
            return Err(InstallError::CommandFailed {
                command: command_line,
                status,
            });
        }
        log_info!(
            "[Maven] Installed {} into {}",
            self.artifact_id.green(),
            self.local_repo.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MavenInstall {
        MavenInstall {
            jar: PathBuf::from("/home/dev/Downloads/swt-4.30-win32-win32-x86_64/swt.jar"),
            group_id: "local.swt".to_string(),
            artifact_id: "swtwin32_x86_64".to_string(),
            version: "4.30".to_string(),
            local_repo: local_repo_dir(Path::new("/src/dataloader")),
        }
    }

    #[test]
    fn args_carry_the_coordinates() {
        assert_eq!(
            sample().args(),
            vec![
                "install:install-file",
                "-Dfile=/home/dev/Downloads/swt-4.30-win32-win32-x86_64/swt.jar",
                "-DgroupId=local.swt",
                "-DartifactId=swtwin32_x86_64",
                "-Dversion=4.30",
                "-Dpackaging=jar",
                "-Dmaven.repo.local=/src/dataloader/local-proj-repo",
            ]
        );
    }

    #[test]
    fn command_line_starts_with_the_tool() {
        let line = sample().command_line("mvn");
        assert!(line.starts_with("mvn install:install-file -Dfile="));
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_is_an_error() {
        let err = sample().run(Path::new("false")).unwrap_err();
        assert!(matches!(err, InstallError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn succeeding_tool_is_ok() {
        sample().run(Path::new("true")).unwrap();
    }
}
