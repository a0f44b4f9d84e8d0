//! Persistence of cleaned tables as a data file plus a schema document.

mod loader;
mod writer;

pub use loader::Loader;
pub use writer::{ExportOutcome, Exporter};
