//! Core type definitions for schema representation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::VehiscopeError;

/// Date format recorded in every schema document.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Semantic type of a column, named by its canonical dtype string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SemanticType {
    /// Small, unordered vocabulary.
    #[serde(rename = "category")]
    Category,
    /// Whole non-negative count up to 255.
    #[serde(rename = "uint8")]
    UInt8,
    /// Whole non-negative count up to 65535.
    #[serde(rename = "uint16")]
    UInt16,
    /// Single-precision amount.
    #[serde(rename = "float32")]
    Float32,
    /// Calendar date parsed with the document's date format.
    #[serde(rename = "datetime64[ns]")]
    DateTime,
    /// Raw numeric column that was never narrowed.
    #[serde(rename = "float64")]
    Float64,
    /// Raw text column that was never categorized.
    #[serde(rename = "object")]
    Object,
}

impl SemanticType {
    /// Canonical type name as written to schema documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Category => "category",
            SemanticType::UInt8 => "uint8",
            SemanticType::UInt16 => "uint16",
            SemanticType::Float32 => "float32",
            SemanticType::DateTime => "datetime64[ns]",
            SemanticType::Float64 => "float64",
            SemanticType::Object => "object",
        }
    }

    /// Returns true for the unsigned integer types.
    pub fn is_unsigned_integer(&self) -> bool {
        matches!(self, SemanticType::UInt8 | SemanticType::UInt16)
    }

    /// Largest value representable by an unsigned integer type.
    pub fn integer_max(&self) -> Option<u64> {
        match self {
            SemanticType::UInt8 => Some(u64::from(u8::MAX)),
            SemanticType::UInt16 => Some(u64::from(u16::MAX)),
            _ => None,
        }
    }

    /// Returns true if this type holds numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::UInt8 | SemanticType::UInt16 | SemanticType::Float32 | SemanticType::Float64
        )
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = VehiscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "category" => Ok(SemanticType::Category),
            "uint8" => Ok(SemanticType::UInt8),
            "uint16" => Ok(SemanticType::UInt16),
            "float32" => Ok(SemanticType::Float32),
            "datetime64[ns]" | "datetime" => Ok(SemanticType::DateTime),
            "float64" => Ok(SemanticType::Float64),
            "object" => Ok(SemanticType::Object),
            other => Err(VehiscopeError::UnknownType(other.to_string())),
        }
    }
}
