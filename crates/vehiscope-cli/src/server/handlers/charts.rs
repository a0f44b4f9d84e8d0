//! Chart data handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use vehiscope::charts::{self, DonutChart, Histogram, MarkerColor, ScatterPlot};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// A chart payload with its presentation hints.
#[derive(Serialize)]
pub struct ChartResponse<T> {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: &'static str,
    pub data: T,
}

/// Axis label for a known column, or the column name itself.
fn label_for(column: &str) -> String {
    match column {
        "odometer" => "Odometer reading (total distance traveled) in miles".to_string(),
        "price" => "Price in USD".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct HistogramQuery {
    #[serde(default = "default_histogram_column")]
    pub column: String,
    pub bins: Option<usize>,
    #[serde(default)]
    pub orange: bool,
}

fn default_histogram_column() -> String {
    "odometer".to_string()
}

/// Distribution of a numeric column.
pub async fn get_histogram(
    State(state): State<AppState>,
    Query(query): Query<HistogramQuery>,
) -> Result<Json<ChartResponse<Histogram>>, ApiError> {
    let bins = query.bins.unwrap_or(state.histogram_bins);
    if bins == 0 || bins > 500 {
        return Err(ApiError::BadRequest(format!(
            "bins must be between 1 and 500, got {}",
            bins
        )));
    }

    let data = charts::histogram(&state.table, &query.column, bins)?;
    let title = if query.column == "odometer" {
        "How long a distance do our vehicles travel?".to_string()
    } else {
        format!("Distribution of {}", query.column)
    };

    Ok(Json(ChartResponse {
        title,
        x_label: label_for(&query.column),
        y_label: "count".to_string(),
        color: MarkerColor::from_orange(query.orange).as_css(),
        data,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ScatterQuery {
    #[serde(default = "default_scatter_x")]
    pub x: String,
    #[serde(default = "default_scatter_y")]
    pub y: String,
    #[serde(default)]
    pub orange: bool,
}

fn default_scatter_x() -> String {
    "odometer".to_string()
}

fn default_scatter_y() -> String {
    "price".to_string()
}

/// Row-wise pairs of two numeric columns.
pub async fn get_scatter(
    State(state): State<AppState>,
    Query(query): Query<ScatterQuery>,
) -> Result<Json<ChartResponse<ScatterPlot>>, ApiError> {
    let data = charts::scatter(&state.table, &query.x, &query.y)?;
    let title = if (query.x.as_str(), query.y.as_str()) == ("odometer", "price") {
        "Does heavy use depreciate vehicles?".to_string()
    } else {
        format!("{} vs {}", query.y, query.x)
    };

    Ok(Json(ChartResponse {
        title,
        x_label: label_for(&query.x),
        y_label: label_for(&query.y),
        color: MarkerColor::from_orange(query.orange).as_css(),
        data,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DonutQuery {
    #[serde(default = "default_donut_names")]
    pub names: String,
    #[serde(default = "default_donut_values")]
    pub values: String,
    #[serde(default)]
    pub orange: bool,
}

fn default_donut_names() -> String {
    "fuel".to_string()
}

fn default_donut_values() -> String {
    "cylinders".to_string()
}

/// Share of listings per category.
pub async fn get_donut(
    State(state): State<AppState>,
    Query(query): Query<DonutQuery>,
) -> Result<Json<ChartResponse<DonutChart>>, ApiError> {
    let data = charts::donut(&state.table, &query.names, &query.values)?;
    let title = if query.names == "fuel" {
        "Which fuel types are more common among the vehicles we sell?".to_string()
    } else {
        format!("Listings per {}", query.names)
    };

    Ok(Json(ChartResponse {
        title,
        x_label: label_for(&query.names),
        y_label: "unit_count".to_string(),
        color: MarkerColor::from_orange(query.orange).as_css(),
        data,
    }))
}
