//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use vehiscope::Table;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    /// The clean table being charted.
    pub table: Arc<Table>,
    /// Default bin count for histograms.
    pub histogram_bins: usize,
    /// Path of the clean data file (for display).
    pub data_path: PathBuf,
}

impl AppState {
    pub fn new(table: Table, histogram_bins: usize, data_path: PathBuf) -> Self {
        Self {
            table: Arc::new(table),
            histogram_bins,
            data_path,
        }
    }
}
