//! JSON Export functionality
//!
//! Wraps a plan or analysis in an envelope carrying the schema version, the
//! export time and the app version.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{PolicyError, PolicyResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// What an export contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    AllocationPlan,
    RebalanceAnalysis,
}

/// Versioned wrapper around exported data
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope<'a, T: Serialize> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub kind: ExportKind,

    pub data: &'a T,
}

impl<'a, T: Serialize> ExportEnvelope<'a, T> {
    pub fn new(kind: ExportKind, data: &'a T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            kind,
            data,
        }
    }
}

/// Export `data` as pretty-printed JSON
pub fn export_json<T: Serialize, W: Write>(
    kind: ExportKind,
    data: &T,
    writer: &mut W,
) -> PolicyResult<()> {
    let envelope = ExportEnvelope::new(kind, data);

    serde_json::to_writer_pretty(&mut *writer, &envelope)
        .map_err(|e| PolicyError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PolicyError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationRule, AllocationRuleKind, Bucket, BudgetCategory, Money};
    use crate::services::AllocationDistributor;

    #[test]
    fn test_allocation_json_envelope() {
        let rule = AllocationRule::builtin(AllocationRuleKind::SeventyFifteenTen);
        let categories = vec![BudgetCategory::new("Rent", Bucket::Need)];
        let plan = AllocationDistributor::new(&rule).plan(Money::from_dollars(1_000), &categories);

        let mut output = Vec::new();
        export_json(ExportKind::AllocationPlan, &plan, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["kind"], "allocation_plan");
        assert!(value["exported_at"].is_string());
        assert_eq!(value["data"]["income"], 100_000);
        assert_eq!(value["data"]["categories"][0]["allocated_amount"], 75_000);
        assert_eq!(value["data"]["unallocated"], 25_000);
        assert_eq!(value["data"]["warnings"][0]["kind"], "empty_bucket");
    }
}
