//! Missing-value resolution: column drop, row drop, and group imputation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, VehiscopeError};
use crate::report::LossSummary;
use crate::table::{ColumnData, Table};

use super::imputation::{FillStrategy, ImputationDictionary};

/// What to do with missing cells whose group has no observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyGroupPolicy {
    /// Fail with `MissingFillValue` naming the group.
    #[default]
    Error,
    /// Leave the cell missing.
    LeaveMissing,
    /// Use the whole-column mode or mean instead.
    GlobalFallback,
}

/// A column filled from a per-group statistic of itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFill {
    /// Column whose missing cells are filled.
    pub column: String,
    /// Column whose values define the groups.
    pub key_column: String,
}

impl GroupFill {
    pub fn new(column: impl Into<String>, key_column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            key_column: key_column.into(),
        }
    }
}

/// The named column roles the resolver works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverRoles {
    /// Removed outright, whatever it contains.
    pub drop_column: String,
    /// Rows missing any of these are removed.
    pub required_columns: Vec<String>,
    /// Filled with the most frequent value of its group.
    pub mode_fill: GroupFill,
    /// Filled with the mean of its group.
    pub mean_fill: GroupFill,
}

impl Default for ResolverRoles {
    fn default() -> Self {
        Self {
            drop_column: "is_4wd".to_string(),
            required_columns: vec!["model_year".to_string(), "cylinders".to_string()],
            mode_fill: GroupFill::new("paint_color", "model"),
            mean_fill: GroupFill::new("odometer", "condition"),
        }
    }
}

/// Cells filled in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillSummary {
    pub column: String,
    pub key_column: String,
    /// Cells that received a group value.
    pub filled: usize,
    /// Cells that received the whole-column value.
    pub fallback_filled: usize,
    /// Cells left missing because their group had no value.
    pub left_missing: usize,
}

/// What a resolver run changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionReport {
    /// Whether the drop column was present.
    pub dropped_column: Option<String>,
    /// Rows removed for missing a required value.
    pub dropped_rows: usize,
    pub mode_fill: FillSummary,
    pub mean_fill: FillSummary,
    pub loss: LossSummary,
}

/// Fills or drops missing values according to fixed column roles.
///
/// The input table is never modified; each call builds its imputation
/// dictionaries from the table it is given.
#[derive(Debug, Clone, Default)]
pub struct MissingValueResolver {
    roles: ResolverRoles,
    empty_group: EmptyGroupPolicy,
}

impl MissingValueResolver {
    /// Create a resolver with the vehicle-listing roles.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles(roles: ResolverRoles) -> Self {
        Self {
            roles,
            empty_group: EmptyGroupPolicy::default(),
        }
    }

    /// Set the empty-group policy.
    pub fn empty_group_policy(mut self, policy: EmptyGroupPolicy) -> Self {
        self.empty_group = policy;
        self
    }

    pub fn roles(&self) -> &ResolverRoles {
        &self.roles
    }

    /// Produce a new table with the role columns resolved.
    pub fn resolve(&self, table: &Table) -> Result<(Table, ResolutionReport)> {
        info!("fixing missing values");
        let mut result = table.clone();

        debug!(column = %self.roles.drop_column, "dropping column");
        let dropped_column = if result.drop_column(&self.roles.drop_column) {
            Some(self.roles.drop_column.clone())
        } else {
            debug!(column = %self.roles.drop_column, "column already absent");
            None
        };

        debug!(columns = ?self.roles.required_columns, "dropping rows missing required values");
        let required = self
            .roles
            .required_columns
            .iter()
            .map(|name| result.require_column(name).map(|c| &c.data))
            .collect::<Result<Vec<&ColumnData>>>()?;
        let before_rows = result.row_count();
        let mut result = result.filter_rows(|row| required.iter().all(|c| !c.is_missing(row)));
        let dropped_rows = before_rows - result.row_count();

        let mode_fill = self.fill_group(&mut result, &self.roles.mode_fill, FillStrategy::Mode)?;
        let mean_fill = self.fill_group(&mut result, &self.roles.mean_fill, FillStrategy::Mean)?;

        let loss = LossSummary::between(table, &result);
        info!(
            rows_lost = loss.lost_rows,
            rows_lost_pct = loss.percentage_rows,
            columns_lost = loss.lost_columns,
            columns_lost_pct = loss.percentage_columns,
            "missing values fixed"
        );

        Ok((
            result,
            ResolutionReport {
                dropped_column,
                dropped_rows,
                mode_fill,
                mean_fill,
                loss,
            },
        ))
    }

    /// Fill every missing cell of one column from its group's statistic.
    fn fill_group(
        &self,
        table: &mut Table,
        fill: &GroupFill,
        strategy: FillStrategy,
    ) -> Result<FillSummary> {
        debug!(column = %fill.column, key = %fill.key_column, ?strategy, "imputing values");

        let keys: Vec<Option<String>> = {
            let key_data = &table.require_column(&fill.key_column)?.data;
            (0..table.row_count())
                .map(|row| key_data.get(row).map(|v| v.to_string()))
                .collect()
        };
        let index = table.index().to_vec();

        let column = table
            .column_mut(&fill.column)
            .ok_or_else(|| VehiscopeError::ColumnNotFound(fill.column.clone()))?;

        let dictionary = ImputationDictionary::build(strategy, &fill.column, &keys, &column.data)?;
        let fallback = match self.empty_group {
            EmptyGroupPolicy::GlobalFallback => {
                ImputationDictionary::global_fill(strategy, &column.data)
            }
            _ => None,
        };

        let mut summary = FillSummary {
            column: fill.column.clone(),
            key_column: fill.key_column.clone(),
            filled: 0,
            fallback_filled: 0,
            left_missing: 0,
        };

        let missing_rows: Vec<usize> = (0..column.data.len())
            .filter(|&row| column.data.is_missing(row))
            .collect();

        let target_type = column.data.semantic_type();
        for row in missing_rows {
            let group_value = keys[row].as_deref().and_then(|k| dictionary.get(k));
            let (value, from_fallback) = match group_value {
                Some(value) => (value.clone(), false),
                None => match (self.empty_group, &fallback) {
                    (EmptyGroupPolicy::GlobalFallback, Some(value)) => (value.clone(), true),
                    (EmptyGroupPolicy::Error, _) => {
                        return Err(VehiscopeError::MissingFillValue {
                            column: fill.column.clone(),
                            key_column: fill.key_column.clone(),
                            group: keys[row]
                                .clone()
                                .unwrap_or_else(|| "<missing>".to_string()),
                        });
                    }
                    _ => {
                        summary.left_missing += 1;
                        continue;
                    }
                },
            };

            column
                .data
                .set(row, value)
                .map_err(|rejected| VehiscopeError::TypeCast {
                    column: fill.column.clone(),
                    row: index[row],
                    value: rejected.to_string(),
                    target: target_type.to_string(),
                })?;

            if from_fallback {
                summary.fallback_filled += 1;
            } else {
                summary.filled += 1;
            }
        }

        if summary.left_missing > 0 {
            warn!(
                column = %fill.column,
                key = %fill.key_column,
                cells = summary.left_missing,
                "groups without observed values left cells missing"
            );
        }

        Ok(summary)
    }
}
