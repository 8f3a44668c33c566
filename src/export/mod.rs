//! Export of computed results
//!
//! - CSV: one row per category or per recommendation (spreadsheet-compatible)
//! - JSON: the full plan or analysis in a versioned envelope
//! - YAML: the same envelope, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;
use std::io::Write;

use crate::error::PolicyResult;
use crate::services::{AllocationPlan, RebalanceAnalysis};

pub use self::csv::{export_allocation_csv, export_rebalance_csv};
pub use json::{export_json, ExportEnvelope, ExportKind, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV rows (spreadsheet-compatible)
    Csv,
    /// JSON document
    Json,
    /// YAML document (human-readable)
    Yaml,
}

/// Write an allocation plan in the chosen format
pub fn write_allocation<W: Write>(
    plan: &AllocationPlan,
    format: ExportFormat,
    writer: &mut W,
) -> PolicyResult<()> {
    match format {
        ExportFormat::Csv => export_allocation_csv(plan, writer),
        ExportFormat::Json => export_json(ExportKind::AllocationPlan, plan, writer),
        ExportFormat::Yaml => export_yaml(ExportKind::AllocationPlan, plan, writer),
    }
}

/// Write a rebalance analysis in the chosen format
pub fn write_rebalance<W: Write>(
    analysis: &RebalanceAnalysis,
    format: ExportFormat,
    writer: &mut W,
) -> PolicyResult<()> {
    match format {
        ExportFormat::Csv => export_rebalance_csv(analysis, writer),
        ExportFormat::Json => export_json(ExportKind::RebalanceAnalysis, analysis, writer),
        ExportFormat::Yaml => export_yaml(ExportKind::RebalanceAnalysis, analysis, writer),
    }
}
