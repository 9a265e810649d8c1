use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfrenderError {
    // Config errors
    #[error("CONFIG_NOT_FOUND: '{path}' not found")]
    ConfigNotFound { path: PathBuf },

    #[error("CONFIG_INVALID: failed to parse '{path}': {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Namespace errors
    #[error("NAMESPACE_NOT_FOUND: namespace '{0}' is not declared in the configuration")]
    NamespaceNotFound(String),

    #[error("NAMESPACE_DIR_MISSING: namespace '{name}' has no directory at '{path}'")]
    NamespaceDirMissing { name: String, path: PathBuf },

    // Data errors
    #[error("TREE_INVALID: {0}")]
    TreeInvalid(#[from] crate::tree::TreeError),

    // Render errors
    #[error("RENDER_FAILED: {template}: {source}")]
    RenderFailed {
        template: PathBuf,
        source: crate::template::RenderError,
    },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    #[error("IO_ERROR: cannot read template '{path}': {source}")]
    TemplateUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<walkdir::Error> for ConfrenderError {
    fn from(err: walkdir::Error) -> Self {
        ConfrenderError::Generic(format!("Directory walk error: {}", err))
    }
}

impl From<toml::ser::Error> for ConfrenderError {
    fn from(err: toml::ser::Error) -> Self {
        ConfrenderError::Generic(format!("TOML serialization error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ConfrenderError>;
