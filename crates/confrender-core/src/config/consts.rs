//! Constants shared across the workspace

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "confrender.toml";

/// Export directory used when `[export] dir` is not set
pub const DEFAULT_EXPORT_DIR: &str = "rendered";
