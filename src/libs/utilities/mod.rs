// Low-level helpers used by the pipeline stages in `libs`.

// PATH lookup for the install tool.
pub mod binary;
// Zip extraction and archive fingerprinting.
pub mod compression;
// Page fetching and the `PageSource` seam.
pub mod http;
// `~` expansion and the downloads directory.
pub mod path_helpers;
