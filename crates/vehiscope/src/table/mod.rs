//! Typed, column-oriented tables.

mod cast;
mod column;
mod frame;

pub use cast::{cast_column, parse_date};
pub use column::{Categorical, Column, ColumnData, Value};
pub use frame::Table;
