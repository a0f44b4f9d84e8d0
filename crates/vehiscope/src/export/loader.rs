//! Reads a clean export back using its schema document.

use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, VehiscopeError};
use crate::schema::SchemaDocument;
use crate::table::{Column, ColumnData, Table, cast_column};

/// Reconstructs typed tables from (csv, schema) pairs.
#[derive(Debug, Clone, Default)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    /// Load a data file, casting every column to the type its schema records.
    pub fn load(&self, data_path: impl AsRef<Path>, schema_path: impl AsRef<Path>) -> Result<Table> {
        let schema = SchemaDocument::load(schema_path)?;
        self.load_with_schema(data_path, &schema)
    }

    /// Load a data file against an already-read schema document.
    ///
    /// Only an empty field is read as missing; labels such as `NA` or
    /// `None` are kept as values.
    pub fn load_with_schema(&self, data_path: impl AsRef<Path>, schema: &SchemaDocument) -> Result<Table> {
        let data_path = data_path.as_ref();
        let file = File::open(data_path).map_err(|source| VehiscopeError::Io {
            path: data_path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let Some((index_header, names)) = headers.split_first() else {
            return Err(VehiscopeError::EmptyData(format!(
                "'{}' has no header row",
                data_path.display()
            )));
        };
        if !index_header.is_empty() {
            return Err(VehiscopeError::SchemaMismatch(format!(
                "expected a leading unnamed index column, found '{}'",
                index_header
            )));
        }

        for name in names {
            if !schema.columns.contains_key(name) {
                return Err(VehiscopeError::SchemaMismatch(format!(
                    "column '{}' has no schema entry",
                    name
                )));
            }
        }
        for name in schema.columns.keys() {
            if !names.contains(name) {
                return Err(VehiscopeError::SchemaMismatch(format!(
                    "schema column '{}' is missing from the data file",
                    name
                )));
            }
        }

        let mut index = Vec::new();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let label = record.get(0).unwrap_or_default();
            let label = label.trim().parse::<usize>().map_err(|_| {
                VehiscopeError::SchemaMismatch(format!(
                    "row {} has a non-positional index label '{}'",
                    row, label
                ))
            })?;
            index.push(label);

            for (col, values) in cells.iter_mut().enumerate() {
                let value = record.get(col + 1).unwrap_or_default();
                values.push((!value.is_empty()).then(|| value.to_string()));
            }
        }

        let columns = names
            .iter()
            .zip(cells)
            .map(|(name, values)| {
                let raw = Column::new(name.clone(), ColumnData::Text(values));
                let target = schema
                    .column_type(name)
                    .ok_or_else(|| VehiscopeError::ColumnNotFound(name.clone()))?;
                let data = cast_column(&raw, target, &index, &schema.date_format)?;
                Ok(Column::new(name.clone(), data))
            })
            .collect::<Result<Vec<Column>>>()?;

        debug!(
            path = %data_path.display(),
            rows = index.len(),
            columns = columns.len(),
            "loaded typed table"
        );

        Table::with_index(index, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Exporter;
    use crate::schema::SemanticType;
    use crate::table::Categorical;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn typed() -> Table {
        let posted = NaiveDate::from_ymd_opt(2018, 6, 23)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Table::with_index(
            vec![0, 2],
            vec![
                Column::new("price", ColumnData::Float32(vec![Some(12000.0), Some(15000.5)])),
                Column::new("model_year", ColumnData::UInt16(vec![Some(2012), Some(2015)])),
                Column::new(
                    "fuel",
                    ColumnData::Category(Categorical::from_labels(vec![
                        Some("gas".to_string()),
                        Some("diesel".to_string()),
                    ])),
                ),
                Column::new("date_posted", ColumnData::DateTime(vec![Some(posted), None])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_load_restores_exported_table() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("clean.csv");
        let schema = dir.path().join("clean_dtypes.yaml");
        let table = typed();

        Exporter::new().export(&table, &data, &schema).unwrap();
        let loaded = Loader::new().load(&data, &schema).unwrap();

        assert_eq!(loaded, table);
        assert_eq!(loaded.index(), &[0, 2]);
    }

    #[test]
    fn test_load_rejects_column_without_schema_entry() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("clean.csv");
        fs::write(&data, ",price,extra\n0,1.5,x\n").unwrap();

        let mut doc = SchemaDocument::from_table(&Table::new(Vec::new()).unwrap());
        doc.columns.insert("price".to_string(), SemanticType::Float32);

        let result = Loader::new().load_with_schema(&data, &doc);
        assert!(matches!(result, Err(VehiscopeError::SchemaMismatch(_))));
    }

    #[test]
    fn test_load_rejects_schema_entry_without_column() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("clean.csv");
        fs::write(&data, ",price\n0,1.5\n").unwrap();

        let mut doc = SchemaDocument::from_table(&Table::new(Vec::new()).unwrap());
        doc.columns.insert("price".to_string(), SemanticType::Float32);
        doc.columns.insert("model".to_string(), SemanticType::Category);

        let result = Loader::new().load_with_schema(&data, &doc);
        assert!(matches!(result, Err(VehiscopeError::SchemaMismatch(_))));
    }

    #[test]
    fn test_load_requires_index_column() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("clean.csv");
        fs::write(&data, "price\n1.5\n").unwrap();

        let mut doc = SchemaDocument::from_table(&Table::new(Vec::new()).unwrap());
        doc.columns.insert("price".to_string(), SemanticType::Float32);

        let result = Loader::new().load_with_schema(&data, &doc);
        assert!(matches!(result, Err(VehiscopeError::SchemaMismatch(_))));
    }

    #[test]
    fn test_load_missing_data_file() {
        let dir = TempDir::new().unwrap();
        let doc = SchemaDocument::from_table(&typed());
        let result = Loader::new().load_with_schema(dir.path().join("absent.csv"), &doc);
        assert!(matches!(result, Err(VehiscopeError::Io { .. })));
    }
}
