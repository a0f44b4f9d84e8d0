//! Writes a typed table together with its schema document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::ExportError;
use crate::schema::SchemaDocument;
use crate::table::Table;

/// Files produced by a successful export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportOutcome {
    pub data_path: PathBuf,
    pub schema_path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// Writes the (csv, schema) pair that makes up a clean export.
///
/// Missing cells are written as empty fields, so an empty string in a
/// text or category column reloads as missing.
#[derive(Debug, Clone, Default)]
pub struct Exporter;

impl Exporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the data file, then its schema document.
    ///
    /// When the data file cannot be written the schema is left untouched.
    /// When the schema cannot be written the new data file is removed, so
    /// it is never paired with a schema from an earlier export.
    pub fn export(
        &self,
        table: &Table,
        data_path: impl AsRef<Path>,
        schema_path: impl AsRef<Path>,
    ) -> Result<ExportOutcome, ExportError> {
        let data_path = data_path.as_ref();
        let schema_path = schema_path.as_ref();
        let schema = SchemaDocument::from_table(table);

        if let Err(e) = self.write_data(table, data_path, &schema.date_format) {
            error!(path = %data_path.display(), error = %e, "could not write data file");
            return Err(e);
        }

        if let Err(e) = schema.save(schema_path) {
            error!(path = %schema_path.display(), error = %e, "could not write schema file");
            if let Err(cleanup) = fs::remove_file(data_path) {
                warn!(path = %data_path.display(), error = %cleanup, "could not remove orphaned data file");
            }
            return Err(e);
        }

        info!(
            data = %data_path.display(),
            schema = %schema_path.display(),
            rows = table.row_count(),
            "exported clean data"
        );

        Ok(ExportOutcome {
            data_path: data_path.to_path_buf(),
            schema_path: schema_path.to_path_buf(),
            rows: table.row_count(),
            columns: table.column_count(),
        })
    }

    /// Write the table with a leading unnamed index column.
    fn write_data(&self, table: &Table, path: &Path, date_format: &str) -> Result<(), ExportError> {
        let data_err = |source: csv::Error| ExportError::DataFile {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| data_err(e.into()))?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(data_err)?;

        let header = std::iter::once("").chain(table.column_names());
        writer.write_record(header).map_err(data_err)?;

        for (row, label) in table.index().iter().enumerate() {
            let cells = std::iter::once(label.to_string()).chain(
                table
                    .columns()
                    .iter()
                    .map(|c| c.data.render(row, date_format).unwrap_or_default()),
            );
            writer.write_record(cells).map_err(data_err)?;
        }

        writer.flush().map_err(|e| data_err(e.into()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnData};
    use tempfile::TempDir;

    fn sample() -> Table {
        Table::new(vec![Column::new(
            "price",
            ColumnData::Float32(vec![Some(75123.45), Some(0.1), None]),
        )])
        .unwrap()
    }

    #[test]
    fn test_float32_written_without_widening() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("clean.csv");
        let schema = dir.path().join("clean_dtypes.yaml");

        Exporter::new().export(&sample(), &data, &schema).unwrap();
        let csv = fs::read_to_string(&data).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec![",price", "0,75123.45", "1,0.1", "2,"]);
    }

    #[test]
    fn test_schema_failure_removes_data_file() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("clean.csv");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = Exporter::new().export(&sample(), &data, blocker.join("clean_dtypes.yaml"));
        assert!(matches!(result, Err(ExportError::SchemaFile { .. })));
        assert!(!data.exists());
    }
}
