//! Buy/sell recommendations from out-of-range deviations

use std::cmp::Reverse;

use tracing::debug;

use crate::models::{Deviation, Money, Priority, RebalanceRecommendation, TradeAction};

/// Turns deviations into prioritized trade recommendations
#[derive(Debug, Clone, Copy, Default)]
pub struct RebalanceRecommender;

impl RebalanceRecommender {
    pub fn new() -> Self {
        Self
    }

    /// One recommendation per out-of-range deviation.
    ///
    /// Overweight classes are sold and underweight classes bought, for the
    /// difference between target and current value. The result is sorted
    /// high → medium → low; equal priorities keep input order. An empty
    /// result means the portfolio is balanced.
    pub fn recommend(
        &self,
        deviations: &[Deviation],
        total_portfolio_value: Money,
    ) -> Vec<RebalanceRecommendation> {
        let mut recommendations: Vec<RebalanceRecommendation> = deviations
            .iter()
            .filter(|d| d.out_of_range)
            .map(|d| self.recommend_one(d, total_portfolio_value))
            .collect();

        // sort_by_key is stable
        recommendations.sort_by_key(|r| Reverse(r.priority));
        recommendations
    }

    fn recommend_one(&self, deviation: &Deviation, total: Money) -> RebalanceRecommendation {
        let action = deviation.direction();
        let target_value = deviation.target_weight.apply(total);
        let action_amount = (target_value - deviation.current_value).abs();
        let priority = Priority::for_deviation(deviation.deviation);

        let reason = match action {
            TradeAction::Sell => format!(
                "{} is {} above target ({} vs {})",
                deviation.asset_class,
                deviation.deviation,
                deviation.current_weight,
                deviation.target_weight
            ),
            TradeAction::Buy => format!(
                "{} is {} below target ({} vs {})",
                deviation.asset_class,
                deviation.deviation,
                deviation.current_weight,
                deviation.target_weight
            ),
            TradeAction::Hold => format!("{} is on target", deviation.asset_class),
        };

        debug!(
            asset_class = %deviation.asset_class,
            action = %action,
            amount = %action_amount,
            priority = %priority,
            "recommendation"
        );

        RebalanceRecommendation {
            asset_class: deviation.asset_class,
            current_weight: deviation.current_weight,
            target_weight: deviation.target_weight,
            current_value: deviation.current_value,
            target_value,
            action,
            action_amount,
            priority,
            reason,
        }
    }
}
