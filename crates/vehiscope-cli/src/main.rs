//! Vehiscope CLI - clean vehicle listings and chart the result.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Clean { json } => commands::clean::run(&cli.config, json),

        Commands::Report { file } => commands::report::run(&cli.config, file),

        Commands::Config => commands::config::run(&cli.config),

        Commands::Dashboard { port, no_open } => {
            commands::dashboard::run(&cli.config, port, no_open)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug output for our crates.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "vehiscope=debug,vehiscope_cli=debug"
    } else {
        "vehiscope=info,vehiscope_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
