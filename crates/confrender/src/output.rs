use colored::Colorize;
use confrender_core::namespace::NamespaceReport;
use std::io::{self, Write};

pub fn print_json(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

pub fn print_text(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

/// Print every diagnostic of a failed namespace to stderr
///
/// One line per problem: `✗ namespace/template:line:column: code: message`
pub fn print_failures(report: &NamespaceReport) -> io::Result<()> {
    let mut err = io::stderr().lock();
    for (template, error) in report.failures() {
        for diagnostic in error.diagnostics() {
            writeln!(
                err,
                "{} {}/{}:{}: {}: {}",
                "✗".red().bold(),
                report.namespace,
                template.display(),
                diagnostic.location,
                diagnostic.code,
                diagnostic.message
            )?;
        }
    }
    Ok(())
}
