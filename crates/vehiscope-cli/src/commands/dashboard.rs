//! Dashboard command - serve charts over the clean export.

use std::path::Path;

use colored::Colorize;
use vehiscope::{Loader, ProjectConfig};

use crate::server::{app, state::AppState};

pub fn run(
    config_path: &Path,
    port: Option<u16>,
    no_open: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ProjectConfig::load(config_path)?;
    let data_path = config.clean_csv_path();
    let schema_path = config.schema_path();

    if !data_path.exists() || !schema_path.exists() {
        return Err(format!(
            "Clean export not found: {}\nRun 'vehiscope clean' first.",
            data_path.display()
        )
        .into());
    }

    let table = Loader::new().load(&data_path, &schema_path)?;
    let rows = table.row_count();
    let state = AppState::new(table, config.dashboard.histogram_bins, data_path.clone());

    let port = port.unwrap_or(config.dashboard.port);
    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting dashboard at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Data: {} ({} rows)", data_path.display(), rows);
    println!("  Schema: {}", schema_path.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        app::run_server(state, port).await
    })?;

    Ok(())
}
