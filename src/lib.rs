//! budget-policy - budget allocation and portfolio rebalancing policy engine
//!
//! The engine splits an income across needs, wants and savings buckets using
//! a named allocation rule, and compares a portfolio against a target
//! strategy to produce prioritized buy/sell recommendations with an estimated
//! cost.
//!
//! # Architecture
//!
//! - `models`: value objects (money, percentages, rules, strategies, ...)
//! - `services`: the pure engine (distribution, threshold evaluation,
//!   recommendation, impact estimation)
//! - `reports`: roll-ups of computed plans
//! - `config`, `scenario`, `export`: file-facing boundary
//! - `cli`, `display`: the `policy` binary's commands and terminal output
//!
//! # Example
//!
//! ```rust
//! use budget_policy::models::{AllocationRule, AllocationRuleKind, Bucket, BudgetCategory, Money};
//! use budget_policy::services::distribute;
//!
//! let rule = AllocationRule::builtin(AllocationRuleKind::FiftyThirtyTwenty);
//! let categories = vec![
//!     BudgetCategory::new("Rent", Bucket::Need),
//!     BudgetCategory::new("Travel", Bucket::Want),
//!     BudgetCategory::new("Index Fund", Bucket::Save),
//! ];
//!
//! let funded = distribute(Money::from_dollars(4_000), &rule, &categories);
//! assert_eq!(funded[0].allocated_amount, Money::from_dollars(2_000));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod file_io;
pub mod log;
pub mod models;
pub mod reports;
pub mod scenario;
pub mod services;

pub use error::{PolicyError, PolicyResult};
