//! Check command - render everything in memory and report problems

use crate::cli::Override;
use crate::context::Context;
use crate::output;
use anyhow::{Result, bail};
use colored::Colorize;
use confrender_core::namespace::{Namespace, NamespaceReport, render_namespace};
use confrender_core::template::Diagnostic;
use serde::Serialize;
use std::path::Path;

/// JSON entry for one template
#[derive(Debug, Serialize)]
struct TemplateCheck {
    namespace: String,
    template: String,
    ok: bool,
    diagnostics: Vec<Diagnostic>,
}

fn to_checks(report: &NamespaceReport) -> Vec<TemplateCheck> {
    report
        .outcomes
        .iter()
        .map(|outcome| TemplateCheck {
            namespace: report.namespace.clone(),
            template: outcome.relative.display().to_string(),
            ok: outcome.result.is_ok(),
            diagnostics: outcome
                .result
                .as_ref()
                .err()
                .map(|e| e.diagnostics())
                .unwrap_or_default(),
        })
        .collect()
}

/// Check one namespace, or all of them, without writing anything
pub fn run(
    config_path: &Path,
    namespace: Option<String>,
    overrides: &[Override],
    json: bool,
) -> Result<()> {
    let ctx = Context::new(config_path, overrides)?;
    let namespaces = Namespace::select(&ctx.root, &ctx.config, namespace.as_deref())?;

    let mut checks = Vec::new();
    let mut problems = 0;

    for ns in &namespaces {
        let report = match render_namespace(ns, &ctx.tree) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Namespace '{}': {}", ns.name, e);
                problems += 1;
                continue;
            }
        };
        problems += report
            .failures()
            .map(|(_, e)| e.diagnostics().len())
            .sum::<usize>();

        if json {
            checks.extend(to_checks(&report));
        } else if report.is_success() {
            println!(
                "{} {}: {} template(s) OK",
                "✓".green().bold(),
                ns.name,
                report.outcomes.len()
            );
        } else {
            output::print_failures(&report)?;
        }
    }

    if json {
        output::print_json(&serde_json::to_string_pretty(&checks)?)?;
    }

    if problems > 0 {
        bail!("{} problem(s) found", problems);
    }

    Ok(())
}
