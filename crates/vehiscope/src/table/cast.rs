//! Coercion of whole columns to a target semantic type.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, VehiscopeError};
use crate::schema::{DEFAULT_DATE_FORMAT, SemanticType};

use super::column::{Categorical, Column, ColumnData, Value};

/// Strict shape of a `%Y-%m-%d` date; chrono alone accepts unpadded fields.
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Parse a date with `format`, at midnight.
///
/// The default format additionally requires the exact `YYYY-MM-DD` shape.
pub fn parse_date(value: &str, format: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if format == DEFAULT_DATE_FORMAT && !ISO_DATE.is_match(value) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, format)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Coerce a column to `target`, returning new storage.
///
/// `index` supplies row labels for error messages. Missing cells stay
/// missing, except for unsigned integer targets, which cannot hold them.
pub fn cast_column(
    column: &Column,
    target: SemanticType,
    index: &[usize],
    date_format: &str,
) -> Result<ColumnData> {
    let data = &column.data;
    if data.semantic_type() == target {
        return Ok(data.clone());
    }

    let cast_err = |row: usize, value: Option<&Value>| VehiscopeError::TypeCast {
        column: column.name.clone(),
        row: index.get(row).copied().unwrap_or(row),
        value: value.map(|v| v.to_string()).unwrap_or_else(|| "<missing>".to_string()),
        target: target.to_string(),
    };

    let rows = 0..data.len();
    let converted = match target {
        SemanticType::Category => ColumnData::Category(Categorical::from_labels(
            rows.map(|r| data.get(r).map(|v| v.to_string())),
        )),
        SemanticType::Object => ColumnData::Text(rows.map(|r| data.get(r).map(|v| v.to_string())).collect()),
        SemanticType::Float64 | SemanticType::Float32 => {
            let values = rows
                .map(|r| match data.get(r) {
                    None => Ok(None),
                    Some(v) => numeric(&v).map(Some).ok_or_else(|| cast_err(r, Some(&v))),
                })
                .collect::<Result<Vec<Option<f64>>>>()?;
            if target == SemanticType::Float32 {
                ColumnData::Float32(values.into_iter().map(|v| v.map(|x| x as f32)).collect())
            } else {
                ColumnData::Float64(values)
            }
        }
        SemanticType::UInt8 | SemanticType::UInt16 => {
            let max = target.integer_max().unwrap_or(u64::MAX);
            let values = rows
                .map(|r| {
                    let value = data.get(r);
                    value
                        .as_ref()
                        .and_then(numeric)
                        .filter(|x| x.is_finite() && *x >= 0.0)
                        .map(f64::trunc)
                        .filter(|x| *x <= max as f64)
                        .map(|x| x as u64)
                        .ok_or_else(|| cast_err(r, value.as_ref()))
                })
                .collect::<Result<Vec<u64>>>()?;
            // Bounds were checked above, so the narrowing casts are exact.
            if target == SemanticType::UInt8 {
                ColumnData::UInt8(values.into_iter().map(|x| Some(x as u8)).collect())
            } else {
                ColumnData::UInt16(values.into_iter().map(|x| Some(x as u16)).collect())
            }
        }
        SemanticType::DateTime => {
            let values = rows
                .map(|r| match data.get(r) {
                    None => Ok(None),
                    Some(v) => parse_date(&v.to_string(), date_format)
                        .map(Some)
                        .ok_or_else(|| VehiscopeError::DateParse {
                            column: column.name.clone(),
                            row: index.get(r).copied().unwrap_or(r),
                            value: v.to_string(),
                            format: date_format.to_string(),
                        }),
                })
                .collect::<Result<Vec<_>>>()?;
            ColumnData::DateTime(values)
        }
    };

    Ok(converted)
}

/// Numeric reading of a value; text is parsed.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Text(s) => s.trim().parse::<f64>().ok().filter(|x| !x.is_nan()),
        other => other.as_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str, values: &[Option<&str>]) -> Column {
        Column::new(
            name,
            ColumnData::Text(values.iter().map(|v| v.map(|s| s.to_string())).collect()),
        )
    }

    #[test]
    fn test_parse_date_strict() {
        assert!(parse_date("2019-06-23", DEFAULT_DATE_FORMAT).is_some());
        assert!(parse_date("2019-6-23", DEFAULT_DATE_FORMAT).is_none());
        assert!(parse_date("06/23/2019", DEFAULT_DATE_FORMAT).is_none());
        assert!(parse_date("2019-13-01", DEFAULT_DATE_FORMAT).is_none());
    }

    #[test]
    fn test_parse_date_other_format() {
        let parsed = parse_date("23/06/2019", "%d/%m/%Y").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2019-06-23");
    }

    #[test]
    fn test_cast_to_uint_truncates() {
        let column = Column::new("cylinders", ColumnData::Float64(vec![Some(6.0), Some(8.7)]));
        let cast = cast_column(&column, SemanticType::UInt8, &[0, 1], DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(cast, ColumnData::UInt8(vec![Some(6), Some(8)]));
    }

    #[test]
    fn test_cast_to_uint_rejects_out_of_range() {
        let column = Column::new("cylinders", ColumnData::Float64(vec![Some(4.0), Some(300.0)]));
        let err = cast_column(&column, SemanticType::UInt8, &[10, 11], DEFAULT_DATE_FORMAT)
            .unwrap_err();
        match err {
            VehiscopeError::TypeCast { row, value, .. } => {
                assert_eq!(row, 11);
                assert_eq!(value, "300");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cast_to_uint_rejects_missing() {
        let column = Column::new("model_year", ColumnData::Float64(vec![None]));
        assert!(cast_column(&column, SemanticType::UInt16, &[0], DEFAULT_DATE_FORMAT).is_err());
    }

    #[test]
    fn test_cast_to_datetime_reports_row_label() {
        let column = text("date_posted", &[Some("2018-06-23"), Some("June 23")]);
        let err = cast_column(&column, SemanticType::DateTime, &[4, 9], DEFAULT_DATE_FORMAT)
            .unwrap_err();
        assert!(matches!(err, VehiscopeError::DateParse { row: 9, .. }));
    }

    #[test]
    fn test_cast_text_numbers_to_float32() {
        let column = text("price", &[Some("12000"), None, Some("15000.5")]);
        let cast = cast_column(&column, SemanticType::Float32, &[0, 1, 2], DEFAULT_DATE_FORMAT)
            .unwrap();
        assert_eq!(cast, ColumnData::Float32(vec![Some(12000.0), None, Some(15000.5)]));
    }

    #[test]
    fn test_cast_to_category() {
        let column = text("fuel", &[Some("gas"), Some("diesel"), None]);
        let cast = cast_column(&column, SemanticType::Category, &[0, 1, 2], DEFAULT_DATE_FORMAT)
            .unwrap();
        match cast {
            ColumnData::Category(c) => {
                assert_eq!(c.categories(), &["diesel".to_string(), "gas".to_string()]);
                assert_eq!(c.label(2), None);
            }
            other => panic!("expected category, got {other:?}"),
        }
    }
}
