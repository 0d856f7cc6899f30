// Archive extraction. SWT is only published as zip, so that is the one format handled.

use crate::log_debug;
use crate::schemas::errors::InstallError;
use colored::Colorize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

/// Extracts every entry of the in-memory zip `bytes` into `dest`, creating `dest` if needed.
///
/// # Returns
/// The number of entries in the archive.
pub fn extract_zip_bytes(bytes: &[u8], dest: &Path) -> Result<usize, InstallError> {
    log_debug!(
        "[Archive] Extracting {} bytes into {}",
        bytes.len(),
        dest.display().to_string().cyan()
    );
    fs::create_dir_all(dest).map_err(|e| InstallError::io(dest, e))?;

    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let entries = archive.len();
    // `extract` rejects entries whose names would escape `dest`.
    archive.extract(dest)?;

    log_debug!("[Archive] Extracted {} entries", entries);
    Ok(entries)
}

/// Lowercase hex SHA-256 of `bytes`, logged so a run can be compared against the
/// checksums published next to each download.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
