// Data structures shared across the pipeline.

// `InstallError`, the single error type of the crate.
pub mod errors;
// `InstallConfig` and `PlatformTarget`, deserialized from the optional YAML file.
pub mod install_config;
