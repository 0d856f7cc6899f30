//! # Archive Installer
//!
//! Turns a platform download link into an extracted directory under the downloads root:
//!
//! - the directory name is the archive's file name (taken from the download link's
//!   filename parameter) without `.zip`;
//! - whatever already sits at that path is removed first, so no stale files survive;
//! - the archive is downloaded into memory and every entry extracted there.
//!
//! The SWT version installed into Maven is the second `-`-separated field of the
//! directory name (`swt-4.30-win32-win32-x86_64` is version `4.30`).

use crate::libs::utilities::compression::{extract_zip_bytes, sha256_hex};
use crate::libs::utilities::http::PageSource;
use crate::schemas::errors::InstallError;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// The archive file name carried by a download URL.
///
/// Download links look like `download.php?dropFile=swt-4.30-win32-win32-x86_64.zip`: the
/// name is the value after the first `=`, up to any further `&` parameter or `#`
/// fragment. If that value is itself a path, only its last segment is used. URLs without
/// a parameter fall back to their last path segment.
pub fn archive_file_name(url: &str) -> Option<&str> {
    let value = match url.split_once('=') {
        Some((_, value)) => value.split(['&', '#']).next().unwrap_or(value),
        None => url.split(['?', '#']).next().unwrap_or(url),
    };
    value
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// `<downloads_dir>/<archive file name without .zip>`.
pub fn extraction_dir(url: &str, downloads_dir: &Path) -> Result<PathBuf, InstallError> {
    let file_name =
        archive_file_name(url).ok_or_else(|| InstallError::BadArchiveName(url.to_string()))?;
    let stem = file_name.strip_suffix(".zip").unwrap_or(file_name);
    if stem.is_empty() || stem == "." || stem == ".." {
        return Err(InstallError::BadArchiveName(url.to_string()));
    }
    Ok(downloads_dir.join(stem))
}

/// Second `-`-separated field of an extraction directory name.
pub fn version_from_dir_name(dir_name: &str) -> Option<&str> {
    dir_name.split('-').nth(1).filter(|version| !version.is_empty())
}

/// Version for the extraction directory `dir`, see [`version_from_dir_name`].
pub fn version_for_dir(dir: &Path) -> Result<String, InstallError> {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| InstallError::BadVersion(dir.display().to_string()))?;
    version_from_dir_name(name)
        .map(str::to_string)
        .ok_or_else(|| InstallError::BadVersion(name.to_string()))
}

/// Deletes any existing directory at `dir`.
///
/// A plain file in the way is removed too, since extraction needs a directory there.
pub fn prepare_extraction_dir(dir: &Path) -> Result<(), InstallError> {
    if dir.is_dir() {
        log_debug!(
            "[Archive] Removing previous extraction at {}",
            dir.display().to_string().yellow()
        );
        fs::remove_dir_all(dir).map_err(|e| InstallError::io(dir, e))?;
    } else if dir.exists() {
        fs::remove_file(dir).map_err(|e| InstallError::io(dir, e))?;
    }
    Ok(())
}

/// Clears `dir`, downloads `archive_url` into memory and extracts it into `dir`.
pub fn download_and_extract<S: PageSource>(
    source: &S,
    archive_url: &str,
    dir: &Path,
) -> Result<(), InstallError> {
    prepare_extraction_dir(dir)?;

    log_info!("[Archive] Downloading {}", archive_url.blue());
    let bytes = source.download_bytes(archive_url)?;
    log_debug!(
        "[Archive] {} bytes, sha256 {}",
        bytes.len(),
        sha256_hex(&bytes).dimmed()
    );

    extract_zip_bytes(&bytes, dir)?;
    log_info!(
        "[Archive] Extracted into {}",
        dir.display().to_string().green()
    );
    Ok(())
}
