//! Namespaces - named directories of templates
//!
//! A namespace `vault` declared as `[namespace.vault]` in confrender.toml has
//! its templates under `<root>/vault/`. Every non-hidden file below that
//! directory is a template; its rendered copy keeps the same relative path
//! under `<export dir>/vault/`.

mod export;
mod skeleton;

pub use export::{export_namespace, render_namespace, NamespaceReport, TemplateOutcome};
pub use skeleton::data_skeleton;

use crate::config::Config;
use crate::error::{ConfrenderError, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A template file loaded from a namespace directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the namespace directory
    pub relative: PathBuf,
    pub source: String,
}

/// A namespace resolved against the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub dir: PathBuf,
}

impl Namespace {
    /// Locate the directory of namespace `name` under `root`
    pub fn discover(root: &Path, name: &str) -> Result<Self> {
        let dir = root.join(name);
        if !dir.is_dir() {
            return Err(ConfrenderError::NamespaceDirMissing {
                name: name.to_string(),
                path: dir,
            });
        }

        Ok(Self {
            name: name.to_string(),
            dir,
        })
    }

    /// Resolve either one declared namespace or all of them, in name order
    pub fn select(root: &Path, config: &Config, only: Option<&str>) -> Result<Vec<Self>> {
        match only {
            Some(name) => {
                if !config.has_namespace(name) {
                    return Err(ConfrenderError::NamespaceNotFound(name.to_string()));
                }
                Ok(vec![Self::discover(root, name)?])
            }
            None => config
                .namespace_names()
                .into_iter()
                .map(|name| Self::discover(root, name))
                .collect(),
        }
    }

    /// Load every template of the namespace, sorted by relative path
    pub fn templates(&self) -> Result<Vec<TemplateFile>> {
        let mut templates = Vec::new();

        let walker = WalkDir::new(&self.dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            let source = std::fs::read_to_string(entry.path()).map_err(|source| {
                ConfrenderError::TemplateUnreadable {
                    path: entry.path().to_path_buf(),
                    source,
                }
            })?;

            log::trace!("Found template {}/{}", self.name, relative.display());
            templates.push(TemplateFile { relative, source });
        }

        log::debug!(
            "Namespace '{}' has {} template(s)",
            self.name,
            templates.len()
        );
        Ok(templates)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confrender_testkit::{temp_dir_in_workspace, write_files};

    #[test]
    fn test_discover_missing_dir() {
        let temp = temp_dir_in_workspace();
        match Namespace::discover(temp.path(), "vault") {
            Err(ConfrenderError::NamespaceDirMissing { name, .. }) => assert_eq!(name, "vault"),
            other => panic!("Expected NamespaceDirMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_templates_sorted_recursive_and_skip_hidden() {
        let temp = temp_dir_in_workspace();
        write_files(
            temp.path(),
            &[
                ("vault/vault.hcl", "ui = {{ vault.ui }}"),
                ("vault/agent/agent.hcl", "a"),
                ("vault/.swap.hcl", "hidden"),
                ("vault/.git/config", "hidden"),
                ("vault/audit.hcl", "b"),
            ],
        );

        let ns = Namespace::discover(temp.path(), "vault").unwrap();
        let templates = ns.templates().unwrap();
        let names: Vec<PathBuf> = templates.iter().map(|t| t.relative.clone()).collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("agent/agent.hcl"),
                PathBuf::from("audit.hcl"),
                PathBuf::from("vault.hcl"),
            ]
        );
        assert_eq!(templates[2].source, "ui = {{ vault.ui }}");
    }

    #[test]
    fn test_templates_unreadable_file_is_io_error() {
        let temp = temp_dir_in_workspace();
        let dir = temp.path().join("vault");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("binary.hcl"), [0xff, 0xfe, 0x00]).unwrap();

        let ns = Namespace::discover(temp.path(), "vault").unwrap();
        match ns.templates() {
            Err(ConfrenderError::TemplateUnreadable { path, source }) => {
                assert_eq!(path, dir.join("binary.hcl"));
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("Expected TemplateUnreadable, got {:?}", other),
        }
    }

    #[test]
    fn test_select_all_and_one() {
        let temp = temp_dir_in_workspace();
        write_files(temp.path(), &[("vault/a.hcl", ""), ("consul/b.hcl", "")]);
        let config: Config =
            toml::from_str("[namespace.vault]\nx = 1\n[namespace.consul]\ny = 2\n").unwrap();

        let all = Namespace::select(temp.path(), &config, None).unwrap();
        let names: Vec<&str> = all.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["consul", "vault"]);

        let one = Namespace::select(temp.path(), &config, Some("vault")).unwrap();
        assert_eq!(one.len(), 1);

        assert!(matches!(
            Namespace::select(temp.path(), &config, Some("nomad")),
            Err(ConfrenderError::NamespaceNotFound(_))
        ));
    }
}
