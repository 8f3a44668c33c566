//! CSV Export functionality

use std::io::Write;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{Money, Percentage};
use crate::services::{AllocationPlan, RebalanceAnalysis};

fn money(m: Money) -> String {
    format!("{:.2}", m.as_f64())
}

fn percent(p: Percentage) -> String {
    format!("{:.2}", p.as_f64())
}

/// Export an allocation plan, one row per category
pub fn export_allocation_csv<W: Write>(plan: &AllocationPlan, writer: &mut W) -> PolicyResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "ID", "Category", "Bucket", "Target %", "Allocated", "Spent", "Remaining",
    ])?;

    for category in &plan.categories {
        csv_writer.write_record([
            category.id.to_string(),
            category.name.clone(),
            category.bucket.label().to_string(),
            percent(plan.rule.target_for(category.bucket)),
            money(category.allocated_amount),
            money(category.spent_amount),
            money(category.remaining_amount()),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| PolicyError::Export(e.to_string()))?;
    Ok(())
}

/// Export a rebalance analysis, one row per recommendation
pub fn export_rebalance_csv<W: Write>(
    analysis: &RebalanceAnalysis,
    writer: &mut W,
) -> PolicyResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "Asset Class",
        "Current %",
        "Target %",
        "Deviation %",
        "Current Value",
        "Target Value",
        "Action",
        "Amount",
        "Priority",
        "Reason",
    ])?;

    for rec in &analysis.recommendations {
        csv_writer.write_record([
            rec.asset_class.name().to_string(),
            percent(rec.current_weight),
            percent(rec.target_weight),
            percent(rec.deviation()),
            money(rec.current_value),
            money(rec.target_value),
            rec.action.to_string(),
            money(rec.action_amount),
            rec.priority.to_string(),
            rec.reason.clone(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| PolicyError::Export(e.to_string()))?;
    Ok(())
}
