//! CLI command structure using clap

use clap::{Parser, Subcommand};
use confrender_core::config::consts::CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "confrender")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the project configuration
    #[arg(
        short,
        long,
        global = true,
        env = "CONFRENDER_CONFIG",
        default_value = CONFIG_FILE
    )]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render namespace templates into the export directory
    Render {
        /// Only render this namespace
        namespace: Option<String>,

        /// Override a value (repeatable)
        #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_override)]
        overrides: Vec<Override>,

        /// Print rendered files instead of writing them
        #[arg(long)]
        stdout: bool,
    },

    /// Render without writing and report every problem
    Check {
        /// Only check this namespace
        namespace: Option<String>,

        /// Override a value (repeatable)
        #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_override)]
        overrides: Vec<Override>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the data every template needs, as confrender.toml tables
    Gendata {
        /// Only this namespace
        namespace: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// A `--set PATH=VALUE` argument
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    pub path: String,
    pub value: String,
}

fn parse_override(arg: &str) -> Result<Override, String> {
    let (path, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=VALUE, got '{}'", arg))?;
    let path = path.trim();
    if path.is_empty() {
        return Err(format!("missing path in '{}'", arg));
    }
    Ok(Override {
        path: path.to_string(),
        value: value.to_string(),
    })
}
