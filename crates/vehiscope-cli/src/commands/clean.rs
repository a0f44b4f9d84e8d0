//! Clean command - run the cleaning pipeline from the project configuration.

use std::path::Path;

use colored::Colorize;
use vehiscope::{ExportStatus, Pipeline, ProjectConfig};

pub fn run(config_path: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = ProjectConfig::load(config_path)?;
    let report = Pipeline::run_project(&config)?;

    if json_output {
        let export = match &report.export {
            ExportStatus::Written(outcome) => serde_json::json!({
                "status": "written",
                "data": outcome.data_path,
                "schema": outcome.schema_path,
                "rows": outcome.rows,
                "columns": outcome.columns,
            }),
            ExportStatus::Failed(e) => serde_json::json!({
                "status": "failed",
                "error": e.to_string(),
            }),
        };
        let summary = serde_json::json!({
            "source": report.source,
            "missing": report.missing,
            "resolution": report.resolution,
            "decimal_checks": report.decimal_checks,
            "export": export,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} {}",
            "Cleaning".cyan().bold(),
            report.source.path.display().to_string().white()
        );
        println!();

        let resolution = &report.resolution;
        println!("{}", "Missing values".bold());
        if let Some(column) = &resolution.dropped_column {
            println!("  Dropped column: {}", column);
        }
        println!("  Dropped rows:   {}", resolution.dropped_rows);
        for fill in [&resolution.mode_fill, &resolution.mean_fill] {
            println!(
                "  {} by {}: {} filled, {} left missing",
                fill.column, fill.key_column, fill.filled, fill.left_missing
            );
        }
        println!();
        println!("{}", resolution.loss);
        println!();

        println!("{}", "Types".bold());
        for check in &report.decimal_checks {
            let marker = if check.requires_decimal {
                "!".yellow()
            } else {
                "✓".green()
            };
            println!("  {} {}", marker, check);
        }
        println!();

        if let ExportStatus::Written(outcome) = &report.export {
            println!(
                "{} {} rows to {}",
                "Exported".green().bold(),
                outcome.rows,
                outcome.data_path.display()
            );
            println!("  Schema: {}", outcome.schema_path.display());
        }
    }

    if let ExportStatus::Failed(e) = report.export {
        eprintln!("{} {}", "Export failed:".red().bold(), e);
        return Err(e.into());
    }

    Ok(())
}
