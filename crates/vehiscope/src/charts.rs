//! Read-only chart aggregates over a typed table.
//!
//! Each builder returns plain serializable data; drawing is left to the
//! consumer (the dashboard page renders them as SVG).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VehiscopeError};
use crate::table::{Column, Table};

/// Marker colour for every chart trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    #[default]
    Teal,
    Orange,
}

impl MarkerColor {
    pub fn from_orange(orange: bool) -> Self {
        if orange { Self::Orange } else { Self::Teal }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Teal => "teal",
            Self::Orange => "orange",
        }
    }
}

/// One equal-width bin; `end` is exclusive except for the last bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    /// Rows skipped because the value was missing.
    pub missing: usize,
}

impl Histogram {
    /// Number of values counted across all bins.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlot {
    pub x: String,
    pub y: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSlice {
    pub name: String,
    pub count: usize,
    /// Fraction of the total count, in `[0, 1]`.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutChart {
    pub names: String,
    pub values: String,
    pub slices: Vec<DonutSlice>,
}

fn numeric_column<'a>(table: &'a Table, name: &str) -> Result<&'a Column> {
    let column = table.require_column(name)?;
    if !column.data.is_numeric() {
        return Err(VehiscopeError::NotNumeric {
            column: name.to_string(),
            found: column.semantic_type().to_string(),
        });
    }
    Ok(column)
}

/// Count the present values of a numeric column into `bins` equal-width bins.
pub fn histogram(table: &Table, column: &str, bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(VehiscopeError::Config(
            "histogram needs at least one bin".to_string(),
        ));
    }
    let data = &numeric_column(table, column)?.data;
    let values: Vec<f64> = (0..data.len())
        .filter_map(|row| data.get_f64(row))
        .filter(|v| v.is_finite())
        .collect();
    let missing = data.len() - values.len();

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if values.is_empty() {
        return Ok(Histogram {
            column: column.to_string(),
            bins: Vec::new(),
            missing,
        });
    }

    // A constant column still gets a bin of unit width.
    let (start, width) = if max > min {
        (min, (max - min) / bins as f64)
    } else {
        (min - 0.5, 1.0 / bins as f64)
    };

    let mut counts = vec![0usize; bins];
    for v in &values {
        let slot = ((v - start) / width).floor() as usize;
        counts[slot.min(bins - 1)] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: start + width * i as f64,
            end: start + width * (i + 1) as f64,
            count,
        })
        .collect();

    Ok(Histogram {
        column: column.to_string(),
        bins,
        missing,
    })
}

/// Pair two numeric columns row by row, keeping rows where both are present.
pub fn scatter(table: &Table, x: &str, y: &str) -> Result<ScatterPlot> {
    let xs = &numeric_column(table, x)?.data;
    let ys = &numeric_column(table, y)?.data;

    let points = (0..table.row_count())
        .filter_map(|row| {
            Some(ScatterPoint {
                x: xs.get_f64(row)?,
                y: ys.get_f64(row)?,
            })
        })
        .collect();

    Ok(ScatterPlot {
        x: x.to_string(),
        y: y.to_string(),
        points,
    })
}

/// Count the present `values` per category of `names`.
///
/// Rows with a missing name are skipped, as are categories with no
/// present value. Slices are ordered by name.
pub fn donut(table: &Table, names: &str, values: &str) -> Result<DonutChart> {
    let name_data = &table.require_column(names)?.data;
    let value_data = &table.require_column(values)?.data;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in 0..table.row_count() {
        let Some(name) = name_data.get(row) else {
            continue;
        };
        if !value_data.is_missing(row) {
            *counts.entry(name.to_string()).or_default() += 1;
        }
    }

    let total: usize = counts.values().sum();
    let slices = counts
        .into_iter()
        .map(|(name, count)| DonutSlice {
            name,
            count,
            share: if total == 0 { 0.0 } else { count as f64 / total as f64 },
        })
        .collect();

    Ok(DonutChart {
        names: names.to_string(),
        values: values.to_string(),
        slices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Categorical, ColumnData};

    fn listings() -> Table {
        Table::new(vec![
            Column::new(
                "price",
                ColumnData::Float32(vec![Some(5000.0), Some(9000.0), None, Some(21000.0)]),
            ),
            Column::new(
                "odometer",
                ColumnData::Float32(vec![Some(0.0), Some(50.0), Some(75.0), Some(100.0)]),
            ),
            Column::new(
                "fuel",
                ColumnData::Category(Categorical::from_labels(vec![
                    Some("gas"),
                    Some("diesel"),
                    Some("gas"),
                    None,
                ])),
            ),
            Column::new(
                "cylinders",
                ColumnData::UInt8(vec![Some(6), Some(8), Some(4), Some(6)]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_histogram_bins_cover_range() {
        let hist = histogram(&listings(), "odometer", 4).unwrap();
        assert_eq!(hist.bins.len(), 4);
        assert_eq!(hist.bins[0].start, 0.0);
        assert_eq!(hist.bins[3].end, 100.0);
        assert_eq!(hist.total(), 4);
        // The maximum lands in the last bin.
        assert_eq!(hist.bins[3].count, 2);
    }

    #[test]
    fn test_histogram_skips_missing() {
        let hist = histogram(&listings(), "price", 2).unwrap();
        assert_eq!(hist.missing, 1);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_histogram_constant_column() {
        let table = Table::new(vec![Column::new(
            "odometer",
            ColumnData::Float64(vec![Some(7.0), Some(7.0)]),
        )])
        .unwrap();
        let hist = histogram(&table, "odometer", 3).unwrap();
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_histogram_rejects_text_column() {
        assert!(matches!(
            histogram(&listings(), "fuel", 10),
            Err(VehiscopeError::NotNumeric { .. })
        ));
        assert!(matches!(
            histogram(&listings(), "odometer", 0),
            Err(VehiscopeError::Config(_))
        ));
    }

    #[test]
    fn test_scatter_keeps_complete_pairs() {
        let plot = scatter(&listings(), "odometer", "price").unwrap();
        assert_eq!(plot.points.len(), 3);
        assert_eq!(plot.points[2], ScatterPoint { x: 100.0, y: 21000.0 });
    }

    #[test]
    fn test_donut_counts_per_category() {
        let chart = donut(&listings(), "fuel", "cylinders").unwrap();
        let counts: Vec<(&str, usize)> = chart
            .slices
            .iter()
            .map(|s| (s.name.as_str(), s.count))
            .collect();
        assert_eq!(counts, vec![("diesel", 1), ("gas", 2)]);
        let share: f64 = chart.slices.iter().map(|s| s.share).sum();
        assert!((share - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_column() {
        assert!(matches!(
            donut(&listings(), "engine", "cylinders"),
            Err(VehiscopeError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_marker_color() {
        assert_eq!(MarkerColor::from_orange(true).as_css(), "orange");
        assert_eq!(MarkerColor::default().as_css(), "teal");
    }
}
