//! Reports over computed plans
//!
//! Currently a per-bucket overview of an allocation plan.

pub mod budget_overview;

pub use budget_overview::{BucketOverviewReport, BucketReportRow};
