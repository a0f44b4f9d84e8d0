//! API request handlers.

mod charts;
mod summary;

pub use charts::*;
pub use summary::*;
