//! Render command - write rendered templates to the export directory

use crate::cli::Override;
use crate::context::Context;
use crate::output;
use anyhow::{Result, bail};
use colored::Colorize;
use confrender_core::namespace::{Namespace, export_namespace, render_namespace};
use std::path::Path;
use std::time::Instant;

/// Render one namespace, or all of them
///
/// A failing namespace is reported and skipped; the others are still
/// rendered. The command fails if any namespace failed.
///
/// # Arguments
///
/// * `config_path` - Path to confrender.toml
/// * `namespace` - Optional namespace name. If None, renders every namespace
/// * `overrides` - `--set` values applied on top of the configuration
/// * `stdout` - Print rendered files instead of exporting them
pub fn run(
    config_path: &Path,
    namespace: Option<String>,
    overrides: &[Override],
    stdout: bool,
) -> Result<()> {
    let ctx = Context::new(config_path, overrides)?;
    let namespaces = Namespace::select(&ctx.root, &ctx.config, namespace.as_deref())?;

    if namespaces.is_empty() {
        println!("{} No namespaces declared", "!".yellow());
        return Ok(());
    }

    let export_dir = ctx.config.export.resolve_dir(&ctx.root);
    let mode = ctx.config.export.mode()?;

    let before = Instant::now();
    let mut failed = Vec::new();

    for ns in &namespaces {
        let report = match render_namespace(ns, &ctx.tree) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Namespace '{}': {}", ns.name, e);
                failed.push(ns.name.clone());
                continue;
            }
        };

        if !report.is_success() {
            output::print_failures(&report)?;
            failed.push(ns.name.clone());
            continue;
        }

        if stdout {
            for (relative, text) in report.rendered() {
                output::print_text(&format!("==> {}/{} <==", ns.name, relative.display()))?;
                output::print_text(text.trim_end_matches('\n'))?;
            }
        } else {
            let target = match export_namespace(&report, &export_dir, mode) {
                Ok(target) => target,
                Err(e) => {
                    log::error!("Namespace '{}': {}", ns.name, e);
                    failed.push(ns.name.clone());
                    continue;
                }
            };
            println!(
                "{} Rendered '{}' ({} file(s)) to {}",
                "✓".green().bold(),
                ns.name,
                report.outcomes.len(),
                target.display()
            );
        }
    }

    let elapsed = before.elapsed();
    if elapsed.as_secs() > 0 {
        log::info!("Rendering took {:.3} seconds.", elapsed.as_secs_f64());
    } else {
        log::info!(
            "Rendering took {:.3} milliseconds.",
            elapsed.as_secs_f64() * 1000.0
        );
    }

    if !failed.is_empty() {
        bail!(
            "{} namespace(s) failed to render: {}",
            failed.len(),
            failed.join(", ")
        );
    }

    Ok(())
}
