//! Global context for CLI commands

use crate::cli::Override;
use anyhow::{Context as _, Result};
use confrender_core::{ConfigTree, Scalar, config::Config};
use std::env;
use std::path::{Path, PathBuf};

/// Loaded project: root directory, configuration and template data
pub struct Context {
    pub root: PathBuf,
    pub config: Config,
    pub tree: ConfigTree,
}

impl Context {
    /// Load the configuration and build the template data
    ///
    /// `overrides` replace (or add) tree values after the file is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file is missing or invalid
    /// - Namespace data cannot be flattened
    /// - An override path is invalid
    pub fn new(config_path: &Path, overrides: &[Override]) -> Result<Self> {
        let config_path = env::current_dir()?.join(config_path);
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let config = Config::from_file(&config_path)?;
        let mut tree = config.tree()?;

        for o in overrides {
            let value = Scalar::parse_literal(&o.value);
            log::debug!("Override {} = {} ({})", o.path, value, value.kind());
            tree.set(o.path.clone(), value)
                .with_context(|| format!("invalid --set '{}'", o.path))?;
        }

        log::debug!("Project root: {}", root.display());
        Ok(Self { root, config, tree })
    }
}
