//! # Install Configuration Schema
//!
//! Describes where to scrape, which platforms to fetch and how to name the resulting
//! Maven artifacts. Every field has a default matching the Eclipse download site, so the
//! configuration file is optional and may override only the fields it names.
//!
//! ```yaml
//! downloads_dir: ~/Downloads
//! http_timeout_secs: 120
//! platforms:
//!   - label: Linux (64 bit version)
//!     artifact_id: swtgtklinux_x86_64
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Start of the scrape: the Eclipse downloads index.
pub const DEFAULT_INDEX_URL: &str = "https://download.eclipse.org/eclipse/downloads/";
/// Base used to make the mirror page's relative download link absolute.
pub const DEFAULT_MIRROR_BASE_URL: &str = "https://www.eclipse.org/downloads/";

/// One platform build of SWT to fetch and install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTarget {
    /// Exact text of the table cell on the release page, e.g. `Windows (64 bit version)`.
    pub label: String,
    /// Maven artifact id the platform's `swt.jar` is installed under.
    pub artifact_id: String,
}

impl PlatformTarget {
    pub fn new(label: &str, artifact_id: &str) -> Self {
        Self {
            label: label.to_string(),
            artifact_id: artifact_id.to_string(),
        }
    }
}

/// Top-level configuration, usually left at its defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub index_url: String,
    /// `id` of the element preceding the "Latest Release" build link on the index page.
    pub latest_release_anchor: String,
    /// `id` of the element opening the "SWT Binary and Source" section of a release page.
    pub swt_section_anchor: String,
    pub mirror_base_url: String,
    /// Extraction root. `None` means `~/Downloads`.
    pub downloads_dir: Option<String>,
    pub group_id: String,
    /// Jar inside each extracted archive that gets installed.
    pub jar_name: String,
    /// Executable looked up on `PATH` and run with `install:install-file`.
    pub install_tool: String,
    /// Overall per-request timeout. No timeout when unset.
    pub http_timeout_secs: Option<u64>,
    pub platforms: Vec<PlatformTarget>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            latest_release_anchor: "Latest_Release".to_string(),
            swt_section_anchor: "SWT".to_string(),
            mirror_base_url: DEFAULT_MIRROR_BASE_URL.to_string(),
            downloads_dir: None,
            group_id: "local.swt".to_string(),
            jar_name: "swt.jar".to_string(),
            install_tool: "mvn".to_string(),
            http_timeout_secs: None,
            platforms: vec![
                PlatformTarget::new("Windows (64 bit version)", "swtwin32_x86_64"),
                PlatformTarget::new("Mac OSX (64 bit version)", "swtmacx86_64"),
                PlatformTarget::new(
                    "Mac OSX (64 bit version for Arm64/AArch64)",
                    "swtmacarm64",
                ),
            ],
        }
    }
}

impl InstallConfig {
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }

    /// Platforms to process, in configured order.
    ///
    /// An empty `only` selects all of them. Otherwise each entry must name a configured
    /// `artifact_id`; an unknown name is reported as an error rather than silently
    /// producing an empty run.
    pub fn select_platforms(&self, only: &[String]) -> Result<Vec<&PlatformTarget>, String> {
        if only.is_empty() {
            return Ok(self.platforms.iter().collect());
        }
        if let Some(unknown) = only
            .iter()
            .find(|wanted| !self.platforms.iter().any(|p| &p.artifact_id == *wanted))
        {
            let known: Vec<&str> = self
                .platforms
                .iter()
                .map(|p| p.artifact_id.as_str())
                .collect();
            return Err(format!(
                "unknown platform '{}' (configured: {})",
                unknown,
                known.join(", ")
            ));
        }
        Ok(self
            .platforms
            .iter()
            .filter(|p| only.contains(&p.artifact_id))
            .collect())
    }
}
