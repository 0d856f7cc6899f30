use clap::Parser;
use std::path::PathBuf;

/// Defines the command-line interface for `swt-install`.
/// `#[derive(Parser)]` generates the argument parsing; a missing `<REPO_ROOT>` prints
/// usage and exits with status 2.
#[derive(Parser, Debug)]
#[command(name = "swt-install", version)]
#[command(
    about = "Download the latest Eclipse SWT binaries and install them into <REPO_ROOT>/local-proj-repo"
)]
pub struct Cli {
    /// Root of the git clone. Artifacts are installed into `<REPO_ROOT>/local-proj-repo`.
    pub repo_root: PathBuf,

    /// Enables detailed debug output (scraped links, resolved URLs, archive digests).
    #[arg(short, long)]
    pub debug: bool,

    /// YAML file overriding the built-in site, platform and Maven settings.
    #[arg(long, env = "SWT_INSTALL_CONFIG")]
    pub config: Option<String>,

    /// Directory the archives are extracted into (defaults to ~/Downloads).
    #[arg(long)]
    pub downloads_dir: Option<String>,

    /// Only install the platform with this artifact id. May be repeated.
    #[arg(long = "platform", value_name = "ARTIFACT_ID")]
    pub platforms: Vec<String>,

    /// Download and extract, but print the Maven command instead of running it.
    #[arg(long)]
    pub dry_run: bool,
}
