//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vehiscope: cleaning pipeline and dashboard for vehicle listings
#[derive(Parser)]
#[command(name = "vehiscope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project configuration file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean the configured dataset and export it with its schema
    Clean {
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report missing values in a raw dataset
    Report {
        /// Data file to inspect (default: the configured dataset)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Show how the configuration file resolves
    Config,

    /// Serve the chart dashboard over the clean export
    Dashboard {
        /// Port for web server (default: from configuration)
        #[arg(short, long)]
        port: Option<u16>,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vehiscope", "clean", "--config", "other.yaml", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("other.yaml"));
        assert!(matches!(cli.command, Commands::Clean { json: false }));
    }

    #[test]
    fn test_dashboard_defaults() {
        let cli = Cli::try_parse_from(["vehiscope", "dashboard"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
        assert!(matches!(
            cli.command,
            Commands::Dashboard { port: None, no_open: false }
        ));
    }
}
