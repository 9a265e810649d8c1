mod cli;
mod commands;
mod context;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            namespace,
            overrides,
            stdout,
        } => commands::render::run(&cli.config, namespace, &overrides, stdout),
        Commands::Check {
            namespace,
            overrides,
            json,
        } => commands::check::run(&cli.config, namespace, &overrides, json),
        Commands::Gendata { namespace, output } => {
            commands::gendata::run(&cli.config, namespace, output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
