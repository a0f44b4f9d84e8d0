//! End-to-end cleaning run: parse, resolve, normalize, export.

use std::path::Path;

use tracing::{info, warn};

use crate::cleaning::{
    EmptyGroupPolicy, MissingValueResolver, ResolutionReport, ResolverRoles, TargetTypes,
    TypeNormalizer, vehicle_target_types,
};
use crate::config::ProjectConfig;
use crate::error::{ExportError, Result};
use crate::export::{ExportOutcome, Exporter};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::report::{DecimalCheck, MissingValueReport};
use crate::table::Table;

/// Configuration for a cleaning run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub parser: ParserConfig,
    pub roles: ResolverRoles,
    pub targets: TargetTypes,
    pub empty_group: EmptyGroupPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            roles: ResolverRoles::default(),
            targets: vehicle_target_types(),
            empty_group: EmptyGroupPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Defaults with the policies a project file overrides.
    pub fn from_project(project: &ProjectConfig) -> Self {
        Self {
            empty_group: project.cleaning.empty_group,
            ..Self::default()
        }
    }
}

/// How the export step ended.
#[derive(Debug)]
pub enum ExportStatus {
    Written(ExportOutcome),
    /// The cleaned table was produced but could not be persisted.
    Failed(ExportError),
}

/// Result of a full cleaning run.
#[derive(Debug)]
pub struct PipelineReport {
    pub source: SourceMetadata,
    /// Missing values in the raw table, before any cleaning.
    pub missing: MissingValueReport,
    pub resolution: ResolutionReport,
    pub decimal_checks: Vec<DecimalCheck>,
    pub export: ExportStatus,
}

impl PipelineReport {
    /// True when cleaning succeeded but nothing was written.
    pub fn is_degraded(&self) -> bool {
        matches!(self.export, ExportStatus::Failed(_))
    }
}

/// The vehicle listings cleaning pipeline.
pub struct Pipeline {
    parser: Parser,
    resolver: MissingValueResolver,
    normalizer: TypeNormalizer,
    exporter: Exporter,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            resolver: MissingValueResolver::with_roles(config.roles)
                .empty_group_policy(config.empty_group),
            normalizer: TypeNormalizer::with_targets(config.targets),
            exporter: Exporter::new(),
        }
    }

    /// Resolve missing values, then normalize types. The input is untouched.
    pub fn clean(&self, raw: &Table) -> Result<(Table, ResolutionReport, Vec<DecimalCheck>)> {
        let (resolved, resolution) = self.resolver.resolve(raw)?;
        let (typed, checks) = self.normalizer.normalize(&resolved)?;
        Ok((typed, resolution, checks))
    }

    /// Clean `input` and export the result.
    ///
    /// Cleaning failures abort the run. An export failure does not: the
    /// report carries it and [`PipelineReport::is_degraded`] returns true.
    pub fn run(
        &self,
        input: impl AsRef<Path>,
        data_out: impl AsRef<Path>,
        schema_out: impl AsRef<Path>,
    ) -> Result<PipelineReport> {
        let (raw, source) = self.parser.parse_table(input)?;
        let missing = MissingValueReport::from_table(&raw);

        let (typed, resolution, decimal_checks) = self.clean(&raw)?;
        info!(
            rows = typed.row_count(),
            columns = typed.column_count(),
            "cleaning finished"
        );

        let export = match self.exporter.export(&typed, data_out, schema_out) {
            Ok(outcome) => ExportStatus::Written(outcome),
            Err(e) => {
                warn!(error = %e, "export failed, run is degraded");
                ExportStatus::Failed(e)
            }
        };

        Ok(PipelineReport {
            source,
            missing,
            resolution,
            decimal_checks,
            export,
        })
    }

    /// Run with every path taken from the project configuration.
    pub fn run_project(project: &ProjectConfig) -> Result<PipelineReport> {
        Self::with_config(PipelineConfig::from_project(project)).run(
            project.raw_data_path(),
            project.clean_csv_path(),
            project.schema_path(),
        )
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
