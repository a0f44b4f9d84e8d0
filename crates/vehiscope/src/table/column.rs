//! Typed column storage and single-cell values.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::schema::{DEFAULT_DATE_FORMAT, SemanticType};

/// A single non-missing cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Float(f64),
    Int(u64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Total ordering used to break ties deterministically.
    ///
    /// Values of the same kind compare naturally; mixed kinds fall back to
    /// their rendered text.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            Value::Text(_) | Value::DateTime(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::DateTime(v) => write!(f, "{}", v.format(DEFAULT_DATE_FORMAT)),
        }
    }
}

/// Finite, unordered vocabulary column stored as codes into a label list.
#[derive(Debug, Clone, PartialEq)]
pub struct Categorical {
    categories: Vec<String>,
    codes: Vec<Option<u32>>,
}

impl Categorical {
    /// Build from labels; the vocabulary is the sorted set of present labels.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let labels: Vec<Option<String>> = labels.into_iter().map(|l| l.map(Into::into)).collect();

        let mut categories: Vec<String> = labels.iter().flatten().cloned().collect();
        categories.sort();
        categories.dedup();

        let codes = labels
            .iter()
            .map(|label| {
                label.as_ref().and_then(|l| {
                    categories
                        .binary_search(l)
                        .ok()
                        .map(|pos| pos as u32)
                })
            })
            .collect();

        Self { categories, codes }
    }

    /// The vocabulary of this column.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Label at a row, `None` when missing.
    pub fn label(&self, row: usize) -> Option<&str> {
        let code = (*self.codes.get(row)?)?;
        self.categories.get(code as usize).map(|s| s.as_str())
    }

    /// Set the label at a row, extending the vocabulary if needed.
    fn set_label(&mut self, row: usize, label: String) {
        let code = match self.categories.iter().position(|c| *c == label) {
            Some(pos) => pos,
            None => {
                self.categories.push(label);
                self.categories.len() - 1
            }
        };
        if let Some(slot) = self.codes.get_mut(row) {
            *slot = Some(code as u32);
        }
    }

    fn select(&self, rows: &[usize]) -> Self {
        Self {
            categories: self.categories.clone(),
            codes: rows.iter().map(|&r| self.codes[r]).collect(),
        }
    }
}

/// Storage for one column; every variant keeps a missing marker per row.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Float64(Vec<Option<f64>>),
    Float32(Vec<Option<f32>>),
    UInt8(Vec<Option<u8>>),
    UInt16(Vec<Option<u16>>),
    Text(Vec<Option<String>>),
    Category(Categorical),
    DateTime(Vec<Option<NaiveDateTime>>),
}

impl ColumnData {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float64(v) => v.len(),
            ColumnData::Float32(v) => v.len(),
            ColumnData::UInt8(v) => v.len(),
            ColumnData::UInt16(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Category(c) => c.len(),
            ColumnData::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The semantic type this storage represents.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            ColumnData::Float64(_) => SemanticType::Float64,
            ColumnData::Float32(_) => SemanticType::Float32,
            ColumnData::UInt8(_) => SemanticType::UInt8,
            ColumnData::UInt16(_) => SemanticType::UInt16,
            ColumnData::Text(_) => SemanticType::Object,
            ColumnData::Category(_) => SemanticType::Category,
            ColumnData::DateTime(_) => SemanticType::DateTime,
        }
    }

    /// Whether the cell at `row` is missing. Out-of-range rows count as missing.
    pub fn is_missing(&self, row: usize) -> bool {
        self.get(row).is_none()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_missing(row)).count()
    }

    /// Get the value at `row`, `None` when missing.
    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            ColumnData::Float64(v) => v.get(row).copied().flatten().map(Value::Float),
            ColumnData::Float32(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| Value::Float(f64::from(x))),
            ColumnData::UInt8(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| Value::Int(u64::from(x))),
            ColumnData::UInt16(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| Value::Int(u64::from(x))),
            ColumnData::Text(v) => v.get(row).cloned().flatten().map(Value::Text),
            ColumnData::Category(c) => c.label(row).map(|l| Value::Text(l.to_string())),
            ColumnData::DateTime(v) => v.get(row).copied().flatten().map(Value::DateTime),
        }
    }

    /// Numeric view of a cell; `None` when missing or not numeric.
    pub fn get_f64(&self, row: usize) -> Option<f64> {
        self.get(row).and_then(|v| v.as_f64())
    }

    /// Whether the storage holds numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnData::Float64(_)
                | ColumnData::Float32(_)
                | ColumnData::UInt8(_)
                | ColumnData::UInt16(_)
        )
    }

    /// Store a value at `row`.
    ///
    /// Returns the value back when it cannot be represented by this column.
    pub fn set(&mut self, row: usize, value: Value) -> Result<(), Value> {
        if row >= self.len() {
            return Err(value);
        }
        match (self, value) {
            (ColumnData::Float64(v), Value::Float(x)) => v[row] = Some(x),
            (ColumnData::Float64(v), Value::Int(x)) => v[row] = Some(x as f64),
            (ColumnData::Float32(v), Value::Float(x)) => v[row] = Some(x as f32),
            (ColumnData::Float32(v), Value::Int(x)) => v[row] = Some(x as f32),
            (ColumnData::UInt8(v), Value::Int(x)) => {
                v[row] = Some(u8::try_from(x).map_err(|_| Value::Int(x))?)
            }
            (ColumnData::UInt16(v), Value::Int(x)) => {
                v[row] = Some(u16::try_from(x).map_err(|_| Value::Int(x))?)
            }
            (ColumnData::Text(v), value) => v[row] = Some(value.to_string()),
            (ColumnData::Category(c), Value::Text(x)) => c.set_label(row, x),
            (ColumnData::DateTime(v), Value::DateTime(x)) => v[row] = Some(x),
            (_, value) => return Err(value),
        }
        Ok(())
    }

    /// Render a cell for delimited output; `None` when missing.
    pub fn render(&self, row: usize, date_format: &str) -> Option<String> {
        match self {
            ColumnData::DateTime(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|d| d.format(date_format).to_string()),
            ColumnData::Float32(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            _ => self.get(row).map(|v| v.to_string()),
        }
    }

    /// Keep only the given rows, in the given order.
    pub fn select(&self, rows: &[usize]) -> ColumnData {
        fn pick<T: Clone>(v: &[T], rows: &[usize]) -> Vec<T> {
            rows.iter().map(|&r| v[r].clone()).collect()
        }
        match self {
            ColumnData::Float64(v) => ColumnData::Float64(pick(v, rows)),
            ColumnData::Float32(v) => ColumnData::Float32(pick(v, rows)),
            ColumnData::UInt8(v) => ColumnData::UInt8(pick(v, rows)),
            ColumnData::UInt16(v) => ColumnData::UInt16(pick(v, rows)),
            ColumnData::Text(v) => ColumnData::Text(pick(v, rows)),
            ColumnData::Category(c) => ColumnData::Category(c.select(rows)),
            ColumnData::DateTime(v) => ColumnData::DateTime(pick(v, rows)),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.data.semantic_type()
    }
}
