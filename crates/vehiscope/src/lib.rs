//! Vehiscope: cleaning and charting of used-vehicle listings.
//!
//! A raw listings file goes through two stages before it is persisted:
//!
//! - **Missing-value resolution**: drop the `is_4wd` column, drop rows
//!   without `model_year` or `cylinders`, fill `paint_color` with the most
//!   frequent colour of the same model and `odometer` with the mean reading
//!   of the same condition.
//! - **Type normalization**: coerce every column to a compact semantic type
//!   (`float32`, `uint16`, `category`, `datetime64[ns]`, ...).
//!
//! The result is written as a csv file plus a YAML schema document, and
//! [`Loader`] reads the pair back with identical types.
//!
//! # Example
//!
//! ```no_run
//! use vehiscope::{Loader, Pipeline};
//!
//! let report = Pipeline::new()
//!     .run("data/vehicles_us.csv", "data/clean.csv", "data/clean_dtypes.yaml")
//!     .unwrap();
//! println!("{}", report.resolution.loss);
//!
//! let table = Loader::new()
//!     .load("data/clean.csv", "data/clean_dtypes.yaml")
//!     .unwrap();
//! println!("Rows: {}", table.row_count());
//! ```

pub mod charts;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod report;
pub mod schema;
pub mod table;

mod pipeline;

pub use crate::pipeline::{ExportStatus, Pipeline, PipelineConfig, PipelineReport};
pub use cleaning::{EmptyGroupPolicy, MissingValueResolver, TypeNormalizer};
pub use config::{ConfigReport, ProjectConfig};
pub use error::{ExportError, Result, VehiscopeError};
pub use export::{ExportOutcome, Exporter, Loader};
pub use input::{DataTable, Parser, SourceMetadata};
pub use report::{LossSummary, MissingValueReport};
pub use schema::{SchemaDocument, SemanticType};
pub use table::{Column, ColumnData, Table, Value};
