//! Logger setup

use colored::Colorize;
use log::{Level, LevelFilter};
use std::io::Write;

/// Install the global logger
///
/// Verbosity 0 shows info, 1 debug, 2 or more trace. `RUST_LOG` wins when set.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let prefix = match record.level() {
                Level::Error => "ERROR >".red().bold(),
                Level::Warn => "WARN  >".yellow().bold(),
                Level::Info => "INFO  >".blue().bold(),
                Level::Debug => "DEBUG >".cyan().bold(),
                Level::Trace => "TRACE >".purple().bold(),
            };
            writeln!(buf, "{} {}", prefix, record.args())
        })
        .init();
}
