//! CLI command implementations.

pub mod clean;
pub mod config;
pub mod dashboard;
pub mod report;
