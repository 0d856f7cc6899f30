//! # Error Types
//!
//! Every fallible step of the pipeline (fetching, scraping, extracting, invoking Maven)
//! reports through [`InstallError`]. The command layer decides what each variant means
//! for the process exit status: `MissingCommand` maps to `2`, everything else to `1`.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    /// Transport failure or non-2xx status from an HTTP GET.
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response arrived but its body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    /// A scraped or configured URL that cannot be parsed or joined.
    #[error("invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The page did not have the structure we scrape for.
    #[error("could not find {what} on {page}")]
    LinkNotFound { what: String, page: String },

    /// Filesystem error while preparing or populating an extraction directory.
    #[error("filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to extract archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The download URL carries no usable archive file name.
    #[error("cannot derive an archive file name from '{0}'")]
    BadArchiveName(String),

    /// The extraction directory name has no `-<version>` component.
    #[error("cannot derive a version from directory name '{0}'")]
    BadVersion(String),

    #[error("expected {} inside the extracted archive, but it does not exist", .0.display())]
    JarMissing(PathBuf),

    /// Required executable is not on `PATH`.
    #[error("did not find the '{0}' command in the execute path")]
    MissingCommand(String),

    /// The install command ran but reported failure.
    #[error("'{command}' exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("configuration error: {0}")]
    Config(String),
}

impl InstallError {
    /// Process exit status for a run that ends with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallError::MissingCommand(_) => 2,
            _ => 1,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        InstallError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_found(what: impl Into<String>, page: impl Into<String>) -> Self {
        InstallError::LinkNotFound {
            what: what.into(),
            page: page.into(),
        }
    }
}
