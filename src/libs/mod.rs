// Pipeline stages and their helpers.

// Extraction directory naming, stale-directory cleanup, download and unzip.
pub mod archive_installer;
// Optional YAML configuration.
pub mod config_loading;
// Forward document-order search for links in a parsed page.
pub mod link_extractor;
// `mvn install:install-file` invocation.
pub mod maven;
// Mirror and meta-refresh hops down to the archive URL.
pub mod redirect;
pub mod utilities;
