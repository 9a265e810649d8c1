//! Gendata command - list the data templates need

use crate::context::Context;
use crate::output;
use anyhow::{Context as _, Result};
use colored::Colorize;
use confrender_core::namespace::{Namespace, data_skeleton};
use std::path::{Path, PathBuf};

/// Print or write the `[namespace.*]` tables every template references
///
/// Values already in the configuration are kept; missing ones are empty
/// strings to fill in.
pub fn run(config_path: &Path, namespace: Option<String>, out_path: Option<PathBuf>) -> Result<()> {
    let ctx = Context::new(config_path, &[])?;
    let namespaces = Namespace::select(&ctx.root, &ctx.config, namespace.as_deref())?;

    let skeleton = data_skeleton(&namespaces, &ctx.tree)?;

    match out_path {
        Some(path) => {
            std::fs::write(&path, &skeleton)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} Wrote {}", "✓".green().bold(), path.display());
        }
        None => output::print_text(skeleton.trim_end_matches('\n'))?,
    }

    Ok(())
}
