// The whole `swt-install` run: find the latest Eclipse release, then fetch, extract and
// install SWT for each configured platform, one after another.
//
// A failure before the per-platform loop (install tool missing, index or release page
// unusable) ends the run. A failure inside the loop is logged, and the loop moves on
// to the next platform.

use crate::cli::cmd_enums::Cli;
use crate::libs::archive_installer::{download_and_extract, extraction_dir, version_for_dir};
use crate::libs::config_loading::load_install_config;
use crate::libs::link_extractor::{link_after_cell_text, link_after_id};
use crate::libs::maven::{MavenInstall, local_repo_dir};
use crate::libs::redirect::{resolve_archive_url, resolve_href};
use crate::libs::utilities::binary::locate_install_tool;
use crate::libs::utilities::http::{HttpFetcher, PageSource};
use crate::libs::utilities::path_helpers::resolve_downloads_dir;
use crate::schemas::errors::InstallError;
use crate::schemas::install_config::{InstallConfig, PlatformTarget};
use crate::{log_debug, log_error, log_info, log_warn};
use colored::Colorize;
use scraper::Html;
use std::path::PathBuf;

/// Settings for one run, resolved from the command line and the configuration.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub repo_root: PathBuf,
    pub downloads_dir: PathBuf,
    pub platforms: Vec<String>,
    pub dry_run: bool,
}

/// A platform that made it all the way through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPlatform {
    pub artifact_id: String,
    pub version: String,
    pub extraction_dir: PathBuf,
}

/// Outcome of the per-platform loop.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub installed: Vec<InstalledPlatform>,
    /// `(artifact id, error message)` for every platform that failed.
    pub failed: Vec<(String, String)>,
}

/// Entry point from `main`. Returns the process exit status.
pub fn run(cli: Cli) -> i32 {
    log_debug!("[Install] CLI arguments: {:?}", cli);

    let config = match load_install_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log_error!("{}", e);
            return e.exit_code();
        }
    };

    let downloads_dir =
        match resolve_downloads_dir(cli.downloads_dir.as_deref(), config.downloads_dir.as_deref()) {
            Ok(dir) => dir,
            Err(e) => {
                log_error!("{}", e);
                return e.exit_code();
            }
        };

    let options = InstallOptions {
        repo_root: cli.repo_root,
        downloads_dir,
        platforms: cli.platforms,
        dry_run: cli.dry_run,
    };

    let fetcher = HttpFetcher::new(config.http_timeout());
    match execute(&fetcher, &config, &options) {
        Ok(report) => summarize(&report),
        Err(e) => {
            log_error!("{}", e);
            e.exit_code()
        }
    }
}

/// Prints the end-of-run summary and picks the exit status.
fn summarize(report: &InstallReport) -> i32 {
    for platform in &report.installed {
        log_info!(
            "[Install] {} {} ({})",
            platform.artifact_id.green(),
            platform.version,
            platform.extraction_dir.display()
        );
    }
    if report.failed.is_empty() {
        log_info!("[Install] All platforms installed");
        return 0;
    }
    for (artifact_id, reason) in &report.failed {
        log_error!("[Install] {} failed: {}", artifact_id.red(), reason);
    }
    1
}

/// Runs the pipeline against `source`.
///
/// The install tool is located before any request is made, so a missing tool means no
/// download and no install attempt. In `dry_run` mode a missing tool is only a warning.
pub fn execute<S: PageSource>(
    source: &S,
    config: &InstallConfig,
    options: &InstallOptions,
) -> Result<InstallReport, InstallError> {
    let tool = if options.dry_run {
        match locate_install_tool(&config.install_tool) {
            Ok(path) => Some(path),
            Err(_) => {
                log_warn!(
                    "[Install] '{}' is not on PATH; continuing because this is a dry run",
                    config.install_tool
                );
                None
            }
        }
    } else {
        Some(locate_install_tool(&config.install_tool)?)
    };

    let targets = config
        .select_platforms(&options.platforms)
        .map_err(InstallError::Config)?;

    let release_url = latest_release_url(source, config)?;
    log_info!("[Install] Latest release: {}", release_url.blue());
    let release_page = Html::parse_document(&source.fetch_page(&release_url)?);

    let mut report = InstallReport::default();
    for target in targets {
        eprintln!("{}", "=".repeat(78).bright_blue());
        log_info!(
            "[Install] {} ({})",
            target.label.bold(),
            target.artifact_id
        );
        let result = install_platform(
            source,
            config,
            options,
            tool.as_deref(),
            &release_page,
            &release_url,
            target,
        );
        match result {
            Ok(installed) => report.installed.push(installed),
            Err(e) => {
                log_error!("[Install] {}: {}", target.artifact_id.red(), e);
                report.failed.push((target.artifact_id.clone(), e.to_string()));
            }
        }
    }
    Ok(report)
}

/// Scrapes the downloads index for the "Latest Release" build page.
pub fn latest_release_url<S: PageSource>(
    source: &S,
    config: &InstallConfig,
) -> Result<String, InstallError> {
    let index = Html::parse_document(&source.fetch_page(&config.index_url)?);
    let href = link_after_id(&index, &config.latest_release_anchor).ok_or_else(|| {
        InstallError::not_found(
            format!("a link after #{}", config.latest_release_anchor),
            config.index_url.as_str(),
        )
    })?;
    resolve_href(&config.index_url, &href)
}

fn install_platform<S: PageSource>(
    source: &S,
    config: &InstallConfig,
    options: &InstallOptions,
    tool: Option<&std::path::Path>,
    release_page: &Html,
    release_url: &str,
    target: &PlatformTarget,
) -> Result<InstalledPlatform, InstallError> {
    let href = link_after_cell_text(release_page, &config.swt_section_anchor, &target.label)
        .ok_or_else(|| {
            InstallError::not_found(
                format!("the '{}' download link", target.label),
                release_url,
            )
        })?;
    let download_page = resolve_href(release_url, &href)?;
    let dir = extraction_dir(&download_page, &options.downloads_dir)?;
    log_debug!(
        "[Install] Download page {} extracts to {}",
        download_page.blue(),
        dir.display()
    );

    let archive_url = resolve_archive_url(source, &download_page, &config.mirror_base_url)?;
    download_and_extract(source, &archive_url, &dir)?;

    let version = version_for_dir(&dir)?;
    let jar = dir.join(&config.jar_name);
    if !jar.is_file() {
        return Err(InstallError::JarMissing(jar));
    }

    let install = MavenInstall {
        jar,
        group_id: config.group_id.clone(),
        artifact_id: target.artifact_id.clone(),
        version: version.clone(),
        local_repo: local_repo_dir(&options.repo_root),
    };
    match (options.dry_run, tool) {
        (false, Some(tool)) => install.run(tool)?,
        _ => log_info!(
            "[Maven] Dry run, would execute: {}",
            install.command_line(&config.install_tool).dimmed()
        ),
    }

    Ok(InstalledPlatform {
        artifact_id: target.artifact_id.clone(),
        version,
        extraction_dir: dir,
    })
}
