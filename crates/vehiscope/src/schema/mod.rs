//! Semantic column types and the persisted schema document.

mod document;
mod types;

pub use document::SchemaDocument;
pub use types::{DEFAULT_DATE_FORMAT, SemanticType};
