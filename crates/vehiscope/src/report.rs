//! Console-style reports shared by the cleaning stages and the CLI.

use std::fmt;

use serde::Serialize;

use crate::table::{ColumnData, Table};

/// Round a percentage to one decimal place, ties to even.
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    format!("{:.1}", raw).parse().unwrap_or(raw)
}

/// Column names rendered as a quoted tuple: `('a', 'b')`.
fn quoted_tuple(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    format!("({})", quoted.join(", "))
}

// =============================================================================
// Decimal information check
// =============================================================================

/// Result of checking whether a float column's fractional parts matter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecimalCheck {
    pub column: String,
    /// Non-missing values with a non-zero fractional part.
    pub informative_values: usize,
    /// True iff at least one value has a fractional part.
    pub requires_decimal: bool,
}

impl fmt::Display for DecimalCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.requires_decimal {
            write!(
                f,
                "'{}' requires decimal part ({} values with fractional information)",
                self.column, self.informative_values
            )
        } else {
            write!(f, "'{}' does not require decimal part", self.column)
        }
    }
}

/// Check whether the decimal part of a numeric column carries information.
///
/// Missing values are ignored.
pub fn check_info_in_decimals(column: &str, data: &ColumnData) -> DecimalCheck {
    let informative_values = (0..data.len())
        .filter_map(|row| data.get_f64(row))
        .filter(|v| v % 1.0 != 0.0)
        .count();

    DecimalCheck {
        column: column.to_string(),
        informative_values,
        requires_decimal: informative_values > 0,
    }
}

// =============================================================================
// Missing value report
// =============================================================================

/// Missing values in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingColumn {
    pub column: String,
    pub count: usize,
    pub percentage: f64,
}

/// Rows missing every column of a combination at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCombination {
    pub columns: Vec<String>,
    pub count: usize,
    pub percentage: f64,
}

/// Single-column and concurrent missing-value analysis of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValueReport {
    pub rows: usize,
    /// Columns with at least one missing value, in table order.
    pub columns: Vec<MissingColumn>,
    /// Every combination of two or more of those columns, by size.
    pub combinations: Vec<MissingCombination>,
}

impl MissingValueReport {
    /// Analyze a table.
    pub fn from_table(table: &Table) -> Self {
        let rows = table.row_count();

        let with_missing: Vec<&crate::table::Column> = table
            .columns()
            .iter()
            .filter(|c| c.data.missing_count() > 0)
            .collect();

        let columns = with_missing
            .iter()
            .map(|c| {
                let count = c.data.missing_count();
                MissingColumn {
                    column: c.name.clone(),
                    count,
                    percentage: percent(count, rows),
                }
            })
            .collect();

        let mut combinations = Vec::new();
        for size in 2..=with_missing.len() {
            for combo in combinations_of(with_missing.len(), size) {
                let count = (0..rows)
                    .filter(|&row| combo.iter().all(|&i| with_missing[i].data.is_missing(row)))
                    .count();
                combinations.push(MissingCombination {
                    columns: combo.iter().map(|&i| with_missing[i].name.clone()).collect(),
                    count,
                    percentage: percent(count, rows),
                });
            }
        }

        Self {
            rows,
            columns,
            combinations,
        }
    }

    /// Whether the table had any missing value.
    pub fn has_missing(&self) -> bool {
        !self.columns.is_empty()
    }
}

/// Index combinations of `k` out of `n`, in lexicographic order.
fn combinations_of(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            extend(i + 1, n, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if k <= n {
        extend(0, n, k, &mut Vec::with_capacity(k), &mut out);
    }
    out
}

impl fmt::Display for MissingValueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*** Missing/Null values report ***")?;
        writeln!(f, "----------------------------------")?;
        if !self.has_missing() {
            writeln!(f, "No missing values found.")?;
        } else {
            writeln!(f, "Single column analysis")?;
            writeln!(f)?;
            for c in &self.columns {
                writeln!(
                    f,
                    "{} ({:.1}%) missing values in column: '{}'",
                    c.count, c.percentage, c.column
                )?;
            }
            writeln!(f)?;

            let mut size = 0;
            for combo in &self.combinations {
                if combo.columns.len() != size {
                    if size != 0 {
                        writeln!(f)?;
                    }
                    size = combo.columns.len();
                    writeln!(f, "Multiple column analysis ({})", size)?;
                    writeln!(f)?;
                }
                writeln!(
                    f,
                    "{} ({:.1}%) concurrent missing values in: {}",
                    combo.count,
                    combo.percentage,
                    quoted_tuple(&combo.columns)
                )?;
            }
            if size != 0 {
                writeln!(f)?;
            }
        }
        writeln!(f, "-----------------------------------")?;
        write!(f, "+++ Report END +++")
    }
}

// =============================================================================
// Row/column loss summary
// =============================================================================

/// Rows and columns lost by a cleaning stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossSummary {
    pub starting_rows: usize,
    pub final_rows: usize,
    pub lost_rows: usize,
    pub percentage_rows: f64,
    pub starting_columns: usize,
    pub final_columns: usize,
    pub lost_columns: usize,
    pub percentage_columns: f64,
}

impl LossSummary {
    /// Compare table shapes before and after a stage.
    pub fn between(before: &Table, after: &Table) -> Self {
        let (starting_rows, final_rows) = (before.row_count(), after.row_count());
        let (starting_columns, final_columns) = (before.column_count(), after.column_count());
        let lost_rows = starting_rows.saturating_sub(final_rows);
        let lost_columns = starting_columns.saturating_sub(final_columns);

        Self {
            starting_rows,
            final_rows,
            lost_rows,
            percentage_rows: percent(lost_rows, starting_rows),
            starting_columns,
            final_columns,
            lost_columns,
            percentage_columns: percent(lost_columns, starting_columns),
        }
    }
}

impl fmt::Display for LossSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Starting rows: {} Rows after: {} ({} rows lost, {:.1}%)",
            self.starting_rows, self.final_rows, self.lost_rows, self.percentage_rows
        )?;
        write!(
            f,
            "Starting columns: {} Columns after: {} ({} columns lost, {:.1}%)",
            self.starting_columns, self.final_columns, self.lost_columns, self.percentage_columns
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn table() -> Table {
        Table::new(vec![
            Column::new(
                "model_year",
                ColumnData::Float64(vec![Some(2011.0), None, None, Some(2013.0)]),
            ),
            Column::new(
                "cylinders",
                ColumnData::Float64(vec![Some(6.0), None, Some(4.0), Some(8.0)]),
            ),
            Column::new(
                "paint_color",
                ColumnData::Text(vec![None, None, Some("red".into()), Some("white".into())]),
            ),
            Column::new(
                "price",
                ColumnData::Float64(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_whole_numbers_do_not_require_decimal() {
        let data = ColumnData::Float64(vec![Some(4.0), None, Some(8.0)]);
        let check = check_info_in_decimals("cylinders", &data);
        assert!(!check.requires_decimal);
        assert_eq!(check.informative_values, 0);
    }

    #[test]
    fn test_one_fraction_requires_decimal() {
        let data = ColumnData::Float64(vec![Some(4.0), None, Some(8.5)]);
        let check = check_info_in_decimals("odometer", &data);
        assert!(check.requires_decimal);
        assert_eq!(check.informative_values, 1);
    }

    #[test]
    fn test_missing_report_single_columns() {
        let report = MissingValueReport::from_table(&table());
        let names: Vec<&str> = report.columns.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(names, vec!["model_year", "cylinders", "paint_color"]);
        assert_eq!(report.columns[0].count, 2);
        assert_eq!(report.columns[0].percentage, 50.0);
        assert_eq!(report.columns[1].percentage, 25.0);
    }

    #[test]
    fn test_missing_report_combinations() {
        let report = MissingValueReport::from_table(&table());
        // 3 pairs + 1 triple
        assert_eq!(report.combinations.len(), 4);
        let pair = &report.combinations[0];
        assert_eq!(pair.columns, vec!["model_year", "cylinders"]);
        assert_eq!(pair.count, 1);
        let triple = report.combinations.last().unwrap();
        assert_eq!(triple.columns.len(), 3);
        assert_eq!(triple.count, 1);
    }

    #[test]
    fn test_missing_report_display() {
        let text = MissingValueReport::from_table(&table()).to_string();
        assert!(text.contains("2 (50.0%) missing values in column: 'model_year'"));
        assert!(text.contains("Multiple column analysis (2)"));
        assert!(text.contains(
            "1 (25.0%) concurrent missing values in: ('model_year', 'cylinders')"
        ));
        assert!(text.ends_with("+++ Report END +++"));
    }

    #[test]
    fn test_clean_table_reports_nothing_missing() {
        let clean = table().filter_rows(|r| r == 3);
        let report = MissingValueReport::from_table(&clean);
        assert!(!report.has_missing());
        assert!(report.to_string().contains("No missing values found."));
    }

    #[test]
    fn test_loss_summary_percentages() {
        let before = table();
        let mut after = before.filter_rows(|r| r != 1);
        after.drop_column("price");
        let loss = LossSummary::between(&before, &after);
        assert_eq!(loss.lost_rows, 1);
        assert_eq!(loss.percentage_rows, 25.0);
        assert_eq!(loss.lost_columns, 1);
        assert_eq!(loss.percentage_columns, 25.0);
    }

    #[test]
    fn test_percent_rounds_ties_to_even() {
        assert_eq!(percent(1, 16), 6.2);
        assert_eq!(percent(3, 16), 18.8);
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(0, 0), 0.0);
    }

    #[test]
    fn test_combinations_of() {
        assert_eq!(
            combinations_of(3, 2),
            vec![vec![0, 1], vec![0, 2], vec![1, 2]]
        );
        assert!(combinations_of(2, 3).is_empty());
    }
}
