//! Display formatting for terminal output
//!
//! Plain-text tables for allocation plans, rebalance analyses and the
//! built-in rule and strategy catalogs.

pub mod allocation;
pub mod rebalance;

pub use allocation::{format_allocation_plan, format_rule_catalog};
pub use rebalance::{format_glide_path, format_rebalance_analysis, format_strategy_catalog};
