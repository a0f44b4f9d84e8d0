//! Coercion of every mapped column to its canonical semantic type.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::report::{DecimalCheck, check_info_in_decimals};
use crate::schema::{DEFAULT_DATE_FORMAT, SemanticType};
use crate::table::{Table, cast_column};

/// Column name to target type, applied in order.
pub type TargetTypes = IndexMap<String, SemanticType>;

/// Target types for the vehicle listings dataset.
pub fn vehicle_target_types() -> TargetTypes {
    [
        ("price", SemanticType::Float32),
        ("model_year", SemanticType::UInt16),
        ("model", SemanticType::Category),
        ("condition", SemanticType::Category),
        ("cylinders", SemanticType::UInt8),
        ("fuel", SemanticType::Category),
        ("odometer", SemanticType::Float32),
        ("transmission", SemanticType::Category),
        ("type", SemanticType::Category),
        ("paint_color", SemanticType::Category),
        ("date_posted", SemanticType::DateTime),
        ("days_listed", SemanticType::UInt16),
    ]
    .into_iter()
    .map(|(name, ty)| (name.to_string(), ty))
    .collect()
}

/// Coerces table columns to fixed target types.
#[derive(Debug, Clone)]
pub struct TypeNormalizer {
    targets: TargetTypes,
    date_format: String,
}

impl TypeNormalizer {
    /// Create a normalizer for the vehicle listings dataset.
    pub fn new() -> Self {
        Self::with_targets(vehicle_target_types())
    }

    pub fn with_targets(targets: TargetTypes) -> Self {
        Self {
            targets,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn targets(&self) -> &TargetTypes {
        &self.targets
    }

    /// Return a new table with every mapped column coerced.
    ///
    /// Narrowing a float column to an unsigned integer first checks whether
    /// its fractional parts carry information. The result is logged and
    /// returned, but never blocks the cast.
    pub fn normalize(&self, table: &Table) -> Result<(Table, Vec<DecimalCheck>)> {
        info!(columns = self.targets.len(), "normalizing column types");
        let mut result = table.clone();
        let mut checks = Vec::new();

        for (name, &target) in &self.targets {
            let Some(column) = table.column(name) else {
                warn!(column = %name, "column to normalize not found, skipping");
                continue;
            };

            if target.is_unsigned_integer() && column.data.is_numeric() {
                let check = check_info_in_decimals(name, &column.data);
                if check.requires_decimal {
                    warn!(
                        column = %name,
                        values = check.informative_values,
                        "decimal part carries information, truncating anyway"
                    );
                } else {
                    debug!(column = %name, "decimal part carries no information");
                }
                checks.push(check);
            }

            let data = cast_column(column, target, table.index(), &self.date_format)?;
            debug!(column = %name, from = %column.semantic_type(), to = %target, "coerced");
            result.replace_data(name, data)?;
        }

        Ok((result, checks))
    }
}

impl Default for TypeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
