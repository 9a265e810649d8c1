//! Data skeleton generation
//!
//! Lists every path the templates of some namespaces reference, as a
//! `[namespace.*]` TOML fragment ready to paste into confrender.toml.

use crate::error::{ConfrenderError, Result};
use crate::template::referenced_paths;
use crate::tree::{ConfigTree, Scalar, TreeError};
use toml::{Table, Value};

use super::Namespace;

/// Build the data skeleton for `namespaces`
///
/// Paths that already have a value in `tree` keep it; missing ones get an
/// empty string. Values no template references are left out. Paths no
/// tree can hold (such as `a..b`) are skipped with a warning; rendering
/// reports them as unresolved.
pub fn data_skeleton(namespaces: &[Namespace], tree: &ConfigTree) -> Result<String> {
    let mut skeleton = ConfigTree::new();

    for namespace in namespaces {
        for template in namespace.templates()? {
            let paths = referenced_paths(&template.source).map_err(|source| {
                ConfrenderError::RenderFailed {
                    template: std::path::Path::new(&namespace.name).join(&template.relative),
                    source,
                }
            })?;

            for path in paths {
                if skeleton.contains(&path) {
                    continue;
                }
                let value = tree
                    .get(&path)
                    .cloned()
                    .unwrap_or_else(|| Scalar::String(String::new()));
                match skeleton.insert(path, value) {
                    Ok(()) => {}
                    Err(TreeError::InvalidPath { path, reason }) => {
                        log::warn!(
                            "Skipping '{}' in {}/{}: {}",
                            path,
                            namespace.name,
                            template.relative.display(),
                            reason
                        );
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    let mut root = Table::new();
    root.insert("namespace".to_string(), skeleton.to_toml());
    Ok(toml::to_string_pretty(&Value::Table(root))?)
}
