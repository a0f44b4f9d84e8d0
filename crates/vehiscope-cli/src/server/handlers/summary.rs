//! Table summary handler.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

#[derive(Serialize)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub semantic_type: String,
    pub missing: usize,
}

/// Response for the summary endpoint.
#[derive(Serialize)]
pub struct SummaryResponse {
    /// Clean data file the table was loaded from.
    pub file: String,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

/// Shape and column types of the loaded table.
pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let columns = state
        .table
        .columns()
        .iter()
        .map(|c| ColumnSummary {
            name: c.name.clone(),
            semantic_type: c.semantic_type().to_string(),
            missing: c.data.missing_count(),
        })
        .collect();

    Json(SummaryResponse {
        file: state.data_path.display().to_string(),
        rows: state.table.row_count(),
        columns,
    })
}
