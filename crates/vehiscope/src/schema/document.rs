//! Schema document: the persisted column-to-type contract of an export.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result, VehiscopeError};
use crate::table::Table;

use super::types::{DEFAULT_DATE_FORMAT, SemanticType};

/// Ordered column types plus the date format used for datetime columns.
///
/// A schema document is produced once per export and never mutated; the
/// data file it accompanies is only meaningful together with it.
///
/// ```yaml
/// columns:
///   price: float32
///   model_year: uint16
///   date_posted: datetime64[ns]
/// date_format: '%Y-%m-%d'
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    /// Column name to canonical type, in table order.
    pub columns: IndexMap<String, SemanticType>,
    /// chrono format string for every datetime column.
    pub date_format: String,
}

/// On-disk form, with type names still unparsed.
#[derive(Deserialize)]
struct RawSchemaDocument {
    columns: IndexMap<String, String>,
    date_format: String,
}

impl SchemaDocument {
    /// Read the type of every column, in table order.
    pub fn from_table(table: &Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.semantic_type()))
            .collect();

        Self {
            columns,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Type recorded for a column.
    pub fn column_type(&self, name: &str) -> Option<SemanticType> {
        self.columns.get(name).copied()
    }

    /// Write the document as YAML.
    ///
    /// The file is created (or truncated) and closed before returning.
    pub fn save(&self, path: impl AsRef<Path>) -> std::result::Result<(), ExportError> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)?;

        let io_err = |source| ExportError::SchemaFile {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let mut file = File::create(path).map_err(io_err)?;
        file.write_all(yaml.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        Ok(())
    }

    /// Load a schema document from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| VehiscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let raw: RawSchemaDocument = serde_yaml::from_reader(BufReader::new(file))?;
        if raw.date_format.trim().is_empty() {
            return Err(VehiscopeError::SchemaMismatch(format!(
                "'{}' has an empty date_format",
                path.display()
            )));
        }

        let columns = raw
            .columns
            .into_iter()
            .map(|(name, ty)| -> Result<(String, SemanticType)> { Ok((name, ty.parse()?)) })
            .collect::<Result<IndexMap<_, _>>>()?;

        Ok(Self {
            columns,
            date_format: raw.date_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_document() -> SchemaDocument {
        let mut columns = IndexMap::new();
        columns.insert("price".to_string(), SemanticType::Float32);
        columns.insert("model_year".to_string(), SemanticType::UInt16);
        columns.insert("date_posted".to_string(), SemanticType::DateTime);
        SchemaDocument {
            columns,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dtypes.yaml");
        let document = sample_document();

        document.save(&path).unwrap();
        let loaded = SchemaDocument::load(&path).unwrap();

        assert_eq!(loaded, document);
        let names: Vec<&str> = loaded.columns.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["price", "model_year", "date_posted"]);
    }

    #[test]
    fn test_saved_yaml_has_both_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dtypes.yaml");
        sample_document().save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("columns:"));
        assert!(text.contains("price: float32"));
        assert!(text.contains("date_format:"));
        assert!(text.contains("%Y-%m-%d"));
    }

    #[test]
    fn test_load_rejects_unknown_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dtypes.yaml");
        fs::write(&path, "columns:\n  price: int64\ndate_format: '%Y-%m-%d'\n").unwrap();

        match SchemaDocument::load(&path) {
            Err(VehiscopeError::UnknownType(name)) => assert_eq!(name, "int64"),
            other => panic!("expected UnknownType, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dtypes.yaml");
        fs::write(&path, "columns: [price]\n").unwrap();

        assert!(matches!(
            SchemaDocument::load(&path),
            Err(VehiscopeError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SchemaDocument::load("/nonexistent/dtypes.yaml");
        assert!(matches!(result, Err(VehiscopeError::Io { .. })));
    }
}
