//! Example: Clean a vehicle listings file and reload the result.
//!
//! Usage:
//!   cargo run --example clean -- <file_path> [output_dir]
//!
//! Example:
//!   cargo run --example clean -- data/vehicles_us.csv data/

use std::env;
use std::path::{Path, PathBuf};

use vehiscope::{ExportStatus, Loader, Pipeline};

fn main() -> vehiscope::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example clean -- <file_path> [output_dir]");
        std::process::exit(1);
    }

    let input = Path::new(&args[1]);
    let out_dir = args.get(2).map(PathBuf::from).unwrap_or_else(|| {
        input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });
    let data = out_dir.join("vehicles_us_clean.csv");
    let schema = out_dir.join("vehicles_us_clean_dtypes.yaml");

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Cleaning: {}", input.display());
    println!("{}", separator);
    println!();

    let report = Pipeline::new().run(input, &data, &schema)?;

    println!("## Source");
    println!("  File: {}", report.source.file);
    println!("  Rows: {}", report.source.row_count);
    println!("  Columns: {}", report.source.column_count);
    println!();

    println!("{}", report.missing);
    println!();

    println!("## Missing value resolution");
    println!("{}", report.resolution.loss);
    println!();

    println!("## Decimal checks");
    for check in &report.decimal_checks {
        println!("  {}", check);
    }
    println!();

    match &report.export {
        ExportStatus::Written(outcome) => {
            let table = Loader::new().load(&outcome.data_path, &outcome.schema_path)?;
            println!("## Export");
            println!("  Data: {}", outcome.data_path.display());
            println!("  Schema: {}", outcome.schema_path.display());
            for column in table.columns() {
                println!("  {:<14} {}", column.name, column.semantic_type());
            }
        }
        ExportStatus::Failed(e) => {
            eprintln!("Export failed: {}", e);
            std::process::exit(2);
        }
    }

    Ok(())
}
