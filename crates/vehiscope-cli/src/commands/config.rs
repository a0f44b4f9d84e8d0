//! Config command - show how the configuration file resolves.

use std::path::Path;

use colored::Colorize;
use vehiscope::{ConfigReport, ProjectConfig};

pub fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match ProjectConfig::load(config_path) {
        Ok(config) => {
            println!("{}", ConfigReport::new(config_path, Some(&config)));
            println!();
            println!("Clean data file:");
            println!("\t{}", config.clean_csv_path().display());
            println!("Schema file:");
            println!("\t{}", config.schema_path().display());
            Ok(())
        }
        Err(e) => {
            println!("{}", ConfigReport::new(config_path, None));
            eprintln!("{} {}", "Warning:".yellow(), e);
            Err(e.into())
        }
    }
}
