//! Test utilities for confrender
//!
//! This crate provides shared testing utilities used across the confrender workspace.

use std::path::Path;
use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// Keeps test files in one gitignored place that is easy to clean up by hand.
/// The directory is removed when the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or the directories
/// cannot be created.
///
/// # Examples
///
/// ```rust
/// use confrender_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("vault.hcl");
/// std::fs::write(&file_path, "ui = {{ vault.ui }}").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write `(relative path, content)` pairs under `root`, creating parent directories
///
/// # Panics
///
/// Panics if any file cannot be written.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write fixture file");
    }
}

/// Minimal project: one `vault` namespace with a listener template
///
/// Mirrors the layout a user would create by hand:
///
/// ```text
/// confrender.toml
/// vault/vault.hcl
/// ```
pub fn write_vault_project(root: &Path, config: &str) {
    write_files(
        root,
        &[
            ("confrender.toml", config),
            (
                "vault/vault.hcl",
                "listener \"tcp\" {\n  address = \"{{ vault.address }}\"\n}\n\nui = {{ vault.ui }}\n",
            ),
        ],
    );
}
