use crate::error::{ConfrenderError, Result};
use crate::tree::ConfigTree;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml::{Table, Value};

use super::consts::DEFAULT_EXPORT_DIR;

/// confrender.toml schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,
    /// One table per namespace; the whole table is the template data
    #[serde(default)]
    pub namespace: Table,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory, relative to the project root
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
    /// Permissions for rendered files, written like `chmod` digits (`640`)
    #[serde(default)]
    pub permissions: Option<u32>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            permissions: None,
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

impl ExportConfig {
    /// Unix mode for rendered files
    ///
    /// `permissions = 640` means `0o640`: each decimal digit is one octal
    /// digit, so digits 8 and 9 are rejected.
    pub fn mode(&self) -> Result<Option<u32>> {
        let Some(value) = self.permissions else {
            return Ok(None);
        };

        let invalid = |reason: &str| ConfrenderError::ConfigInvalidValue {
            field: "export.permissions".to_string(),
            reason: format!("{} (got {})", reason, value),
        };

        if value > 777 {
            return Err(invalid("at most three digits are allowed"));
        }

        let user = value / 100;
        let group = value % 100 / 10;
        let other = value % 10;
        if user > 7 || group > 7 || other > 7 {
            return Err(invalid("each digit must be between 0 and 7"));
        }

        Ok(Some(user * 64 + group * 8 + other))
    }

    /// Absolute export directory for a project rooted at `root`
    pub fn resolve_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.dir)
    }
}

impl Config {
    /// Read confrender.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfrenderError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfrenderError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        log::debug!(
            "Loaded {} with {} namespace(s)",
            path.display(),
            config.namespace.len()
        );
        Ok(config)
    }

    /// Check structural rules serde cannot express
    pub fn validate(&self) -> Result<()> {
        for (name, value) in &self.namespace {
            if !value.is_table() {
                return Err(ConfrenderError::ConfigInvalidValue {
                    field: format!("namespace.{}", name),
                    reason: format!("expected a table, found {}", value.type_str()),
                });
            }
        }
        self.export.mode()?;
        Ok(())
    }

    /// Declared namespace names, sorted
    pub fn namespace_names(&self) -> Vec<&str> {
        self.namespace.keys().map(String::as_str).collect()
    }

    pub fn has_namespace(&self, name: &str) -> bool {
        self.namespace.contains_key(name)
    }

    /// Template data: all namespace tables flattened into one tree
    ///
    /// Paths start with the namespace name, so templates of one namespace can
    /// also read values of another.
    pub fn tree(&self) -> Result<ConfigTree> {
        Ok(ConfigTree::from_toml(&Value::Table(self.namespace.clone()))?)
    }
}
