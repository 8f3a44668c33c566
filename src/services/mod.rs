//! Policy engine services
//!
//! Pure, synchronous computations over caller-supplied value objects. No
//! service performs I/O or keeps state between calls, and none mutates its
//! inputs.

pub mod allocation;
pub mod impact;
pub mod rebalance;
pub mod recommender;
pub mod threshold;

pub use allocation::{distribute, AllocationDistributor, AllocationPlan, AllocationWarning, BucketAmounts};
pub use impact::ImpactEstimator;
pub use rebalance::{RebalanceAnalysis, RebalanceConfig, RebalanceService};
pub use recommender::RebalanceRecommender;
pub use threshold::ThresholdEvaluator;
