//! Ordered, column-oriented table with positional row labels.

use crate::error::{Result, VehiscopeError};
use crate::input::DataTable;

use super::column::{Column, ColumnData};

/// An ordered collection of named, typed columns.
///
/// Rows carry a positional label assigned at load time. Labels survive row
/// filtering, so an exported table still records where each row came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<usize>,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table with labels `0..n`.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(|c| c.data.len()).unwrap_or(0);
        Self::with_index((0..rows).collect(), columns)
    }

    /// Build a table with explicit row labels.
    pub fn with_index(index: Vec<usize>, columns: Vec<Column>) -> Result<Self> {
        for column in &columns {
            if column.data.len() != index.len() {
                return Err(VehiscopeError::SchemaMismatch(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name,
                    column.data.len(),
                    index.len()
                )));
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(VehiscopeError::SchemaMismatch(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
        }
        Ok(Self { index, columns })
    }

    /// Infer raw columns from parsed text.
    ///
    /// A column whose every present value parses as a number becomes
    /// `Float64` (this includes all-missing columns); anything else stays text.
    pub fn from_data_table(data: &DataTable) -> Result<Self> {
        let columns = data
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<Option<&str>> = data
                    .column_values(idx)
                    .map(|v| {
                        let trimmed = v.trim();
                        (!DataTable::is_null_value(trimmed)).then_some(trimmed)
                    })
                    .collect();

                let numeric: Option<Vec<Option<f64>>> = cells
                    .iter()
                    .map(|cell| match cell {
                        Some(v) => v.parse::<f64>().ok().map(Some),
                        None => Some(None),
                    })
                    .collect();

                let data = match numeric {
                    Some(values) => ColumnData::Float64(values),
                    None => ColumnData::Text(
                        cells
                            .into_iter()
                            .map(|c| c.map(|s| s.to_string()))
                            .collect(),
                    ),
                };
                Column::new(name.clone(), data)
            })
            .collect();

        Self::new(columns)
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Row labels, in row order.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column or fail with `ColumnNotFound`.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| VehiscopeError::ColumnNotFound(name.to_string()))
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Replace the storage of an existing column.
    pub fn replace_data(&mut self, name: &str, data: ColumnData) -> Result<()> {
        if data.len() != self.row_count() {
            return Err(VehiscopeError::SchemaMismatch(format!(
                "replacement for '{}' has {} rows, expected {}",
                name,
                data.len(),
                self.row_count()
            )));
        }
        let column = self
            .column_mut(name)
            .ok_or_else(|| VehiscopeError::ColumnNotFound(name.to_string()))?;
        column.data = data;
        Ok(())
    }

    /// Remove a column. Returns false when it was not present.
    pub fn drop_column(&mut self, name: &str) -> bool {
        match self.column_position(name) {
            Some(pos) => {
                self.columns.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Keep the rows for which `keep` returns true, preserving labels.
    pub fn filter_rows(&self, keep: impl Fn(usize) -> bool) -> Table {
        let rows: Vec<usize> = (0..self.row_count()).filter(|&r| keep(r)).collect();
        Table {
            index: rows.iter().map(|&r| self.index[r]).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.data.select(&rows)))
                .collect(),
        }
    }
}
