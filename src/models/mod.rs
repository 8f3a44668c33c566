//! Value objects for the policy engine
//!
//! Budget side: buckets, categories and allocation rules. Portfolio side:
//! holdings, strategies, deviations, recommendations and their impact.

pub mod category;
pub mod ids;
pub mod impact;
pub mod money;
pub mod percentage;
pub mod portfolio;
pub mod recommendation;
pub mod rule;
pub mod strategy;

pub use category::{Bucket, BudgetCategory, CategoryValidationError};
pub use ids::CategoryId;
pub use impact::{CostAssumptions, ImpactSummary};
pub use money::Money;
pub use percentage::Percentage;
pub use portfolio::{AssetClass, Holding, Portfolio, PortfolioPosition};
pub use recommendation::{Deviation, Priority, RebalanceRecommendation, RebalanceThreshold, TradeAction};
pub use rule::{AllocationRule, AllocationRuleKind, BucketTargets, CustomPercentages, RuleSelection};
pub use strategy::{RebalanceStrategy, RebalanceStrategyKind, RebalancingFrequency, RiskTolerance};
