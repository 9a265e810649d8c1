//! Namespace rendering and export

use crate::error::{ConfrenderError, Result};
use crate::template::{RenderError, TemplateRenderer};
use crate::tree::ConfigTree;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::Namespace;

/// Result of rendering one template file
#[derive(Debug, Clone)]
pub struct TemplateOutcome {
    /// Path relative to the namespace directory
    pub relative: PathBuf,
    pub result: std::result::Result<String, RenderError>,
}

/// Rendering results for every template of a namespace
#[derive(Debug, Clone)]
pub struct NamespaceReport {
    pub namespace: String,
    /// Template directory the report was rendered from
    pub source_dir: PathBuf,
    pub outcomes: Vec<TemplateOutcome>,
}

impl NamespaceReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Templates that failed, in path order
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &RenderError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.relative.as_path(), e)))
    }

    /// Templates that rendered, in path order
    pub fn rendered(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|s| (o.relative.as_path(), s.as_str())))
    }
}

/// Render every template of a namespace
///
/// Render failures are recorded per template; only I/O problems abort.
pub fn render_namespace(namespace: &Namespace, tree: &ConfigTree) -> Result<NamespaceReport> {
    let renderer = TemplateRenderer::new();

    let outcomes = namespace
        .templates()?
        .into_iter()
        .map(|template| {
            let result = renderer.render(&template.source, tree);
            if let Err(e) = &result {
                log::debug!(
                    "Template {}/{} failed: {}",
                    namespace.name,
                    template.relative.display(),
                    e
                );
            }
            TemplateOutcome {
                relative: template.relative,
                result,
            }
        })
        .collect();

    Ok(NamespaceReport {
        namespace: namespace.name.clone(),
        source_dir: namespace.dir.clone(),
        outcomes,
    })
}

/// Write a fully rendered namespace to `export_dir/<namespace>/`
///
/// # Steps
/// 1. Refuse if any template failed (nothing is written)
/// 2. Refuse a target that overlaps the namespace's template directory
/// 3. Write every file into a temp directory inside `export_dir`
/// 4. Apply `mode` to each file (Unix only)
/// 5. Replace the previous output with a rename
///
/// Returns the directory the namespace was exported to.
pub fn export_namespace(
    report: &NamespaceReport,
    export_dir: &Path,
    mode: Option<u32>,
) -> Result<PathBuf> {
    if let Some((template, err)) = report.failures().next() {
        return Err(ConfrenderError::RenderFailed {
            template: Path::new(&report.namespace).join(template),
            source: err.clone(),
        });
    }

    let target = export_dir.join(&report.namespace);
    check_target(&report.source_dir, &target)?;

    fs::create_dir_all(export_dir)?;

    // Staging directory on the same filesystem so the final rename is atomic
    let temp_dir = TempDir::new_in(export_dir)?;
    let staging = temp_dir.path().join(&report.namespace);
    fs::create_dir(&staging)?;

    for (relative, content) in report.rendered() {
        let path = staging.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        if let Some(mode) = mode {
            set_mode(&path, mode)?;
        }
        log::trace!("Staged {}", path.display());
    }

    if target.exists() {
        fs::remove_dir_all(&target)?;
    }
    fs::rename(&staging, &target)?;

    log::debug!(
        "Exported namespace '{}' to {}",
        report.namespace,
        target.display()
    );
    Ok(target)
}

/// Reject an export target equal to, inside, or containing `source_dir`
///
/// Exporting there would replace the templates with their rendered output.
fn check_target(source_dir: &Path, target: &Path) -> Result<()> {
    let source = fs::canonicalize(source_dir)?;
    let resolved = canonicalize_existing(target)?;

    if resolved.starts_with(&source) || source.starts_with(&resolved) {
        return Err(ConfrenderError::ConfigInvalidValue {
            field: "export.dir".to_string(),
            reason: format!(
                "export target '{}' overlaps the template directory '{}'",
                resolved.display(),
                source.display()
            ),
        });
    }
    Ok(())
}

/// Canonicalize the longest existing ancestor of `path` and re-append the rest
fn canonicalize_existing(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();

    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(path.to_path_buf()),
        }
    }

    let mut resolved = fs::canonicalize(existing)?;
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(path: &Path, _mode: u32) -> Result<()> {
    log::warn!(
        "Ignoring export.permissions for {} on this platform",
        path.display()
    );
    Ok(())
}
