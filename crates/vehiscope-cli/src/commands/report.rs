//! Report command - missing-value analysis of a raw dataset.

use std::path::{Path, PathBuf};

use vehiscope::{MissingValueReport, Parser, ProjectConfig};

pub fn run(config_path: &Path, file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = match file {
        Some(path) => path,
        None => ProjectConfig::load(config_path)?.raw_data_path(),
    };

    let (table, _) = Parser::new().parse_table(&path)?;
    println!("{}", MissingValueReport::from_table(&table));

    Ok(())
}
