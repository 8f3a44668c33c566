//! Threshold evaluation of current vs. target weights

use tracing::debug;

use crate::models::{Deviation, PortfolioPosition, RebalanceStrategy, RebalanceThreshold};

/// Compares positions against a strategy's target weights
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdEvaluator {
    threshold: RebalanceThreshold,
}

impl ThresholdEvaluator {
    pub fn new(threshold: RebalanceThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> RebalanceThreshold {
        self.threshold
    }

    /// One deviation per asset class present both in `positions` and in the
    /// strategy, in position order. Classes on only one side are skipped.
    ///
    /// A class is out of range when its deviation is at or above the
    /// threshold.
    pub fn evaluate(
        &self,
        positions: &[PortfolioPosition],
        strategy: &RebalanceStrategy,
    ) -> Vec<Deviation> {
        let limit = self.threshold.as_percentage();

        positions
            .iter()
            .filter_map(|position| {
                let Some(target_weight) = strategy.target_for(position.asset_class) else {
                    debug!(asset_class = %position.asset_class, "not in strategy, skipping");
                    return None;
                };

                let deviation = (position.current_weight - target_weight).abs();
                let out_of_range = deviation >= limit;
                debug!(
                    asset_class = %position.asset_class,
                    current = %position.current_weight,
                    target = %target_weight,
                    deviation = %deviation,
                    out_of_range,
                    "evaluated"
                );

                Some(Deviation {
                    asset_class: position.asset_class,
                    current_weight: position.current_weight,
                    target_weight,
                    current_value: position.current_value,
                    deviation,
                    out_of_range,
                })
            })
            .collect()
    }
}
