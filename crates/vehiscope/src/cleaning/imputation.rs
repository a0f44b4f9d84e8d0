//! Per-group fill values built fresh from the current table.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{Result, VehiscopeError};
use crate::table::{ColumnData, Value};

/// How a group's fill value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStrategy {
    /// Most frequent value; ties go to the smallest value.
    Mode,
    /// Arithmetic mean of the numeric values.
    Mean,
}

/// Mapping from a grouping key to the value used to fill missing cells.
///
/// Groups in which every target cell is missing have no entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputationDictionary {
    strategy: FillStrategy,
    fills: HashMap<String, Value>,
}

impl ImputationDictionary {
    /// Build the dictionary for `target`, grouped by the rendered `keys`.
    ///
    /// Rows with a missing key belong to no group.
    pub fn build(
        strategy: FillStrategy,
        column: &str,
        keys: &[Option<String>],
        target: &ColumnData,
    ) -> Result<Self> {
        let fills = match strategy {
            FillStrategy::Mode => group_modes(keys, target),
            FillStrategy::Mean => {
                if !target.is_numeric() {
                    return Err(VehiscopeError::TypeCast {
                        column: column.to_string(),
                        row: 0,
                        value: target.semantic_type().to_string(),
                        target: "a numeric column for mean imputation".to_string(),
                    });
                }
                group_means(keys, target)
            }
        };
        Ok(Self { strategy, fills })
    }

    /// The whole-column mode or mean, `None` if the column is all missing.
    pub fn global_fill(strategy: FillStrategy, target: &ColumnData) -> Option<Value> {
        let keys = vec![Some(String::new()); target.len()];
        let mut fills = match strategy {
            FillStrategy::Mode => group_modes(&keys, target),
            FillStrategy::Mean => group_means(&keys, target),
        };
        fills.remove("")
    }

    pub fn strategy(&self) -> FillStrategy {
        self.strategy
    }

    /// Fill value for a group.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fills.get(key)
    }

    /// Number of groups with a fill value.
    pub fn len(&self) -> usize {
        self.fills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }
}

fn group_modes(keys: &[Option<String>], target: &ColumnData) -> HashMap<String, Value> {
    // group -> rendered value -> (value, count)
    let mut counts: HashMap<&str, IndexMap<String, (Value, usize)>> = HashMap::new();
    for (row, key) in keys.iter().enumerate() {
        let (Some(key), Some(value)) = (key.as_deref(), target.get(row)) else {
            continue;
        };
        counts
            .entry(key)
            .or_default()
            .entry(value.to_string())
            .or_insert((value, 0))
            .1 += 1;
    }

    counts
        .into_iter()
        .filter_map(|(key, values)| {
            values
                .into_values()
                .reduce(|best, candidate| {
                    let better = candidate.1 > best.1
                        || (candidate.1 == best.1
                            && candidate.0.total_cmp(&best.0).is_lt());
                    if better { candidate } else { best }
                })
                .map(|(value, _)| (key.to_string(), value))
        })
        .collect()
}

fn group_means(keys: &[Option<String>], target: &ColumnData) -> HashMap<String, Value> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for (row, key) in keys.iter().enumerate() {
        let (Some(key), Some(value)) = (key.as_deref(), target.get_f64(row)) else {
            continue;
        };
        let entry = sums.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(key, (sum, n))| (key.to_string(), Value::Float(sum / n as f64)))
        .collect()
}
