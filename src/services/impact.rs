//! Cost and effect estimates for a recommendation set

use tracing::debug;

use crate::models::{CostAssumptions, ImpactSummary, Money, RebalanceRecommendation, TradeAction};

/// Applies flat cost assumptions to recommended trades
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactEstimator {
    assumptions: CostAssumptions,
}

impl ImpactEstimator {
    pub fn new(assumptions: CostAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &CostAssumptions {
        &self.assumptions
    }

    /// Summarize the volume and estimated cost of `recommendations`.
    ///
    /// Fees and taxes are flat shares of the total traded volume and are
    /// zero when their toggle is off. Projected deltas come straight from
    /// the assumptions and are only reported when there is something to
    /// trade, so an empty set yields an all-zero summary.
    pub fn estimate(
        &self,
        recommendations: &[RebalanceRecommendation],
        consider_taxes: bool,
        consider_fees: bool,
    ) -> ImpactSummary {
        if recommendations.is_empty() {
            return ImpactSummary::default();
        }

        let volume_for = |action: TradeAction| -> Money {
            recommendations
                .iter()
                .filter(|r| r.action == action)
                .map(|r| r.action_amount)
                .sum()
        };

        let total_transaction_amount: Money =
            recommendations.iter().map(|r| r.action_amount).sum();

        let estimated_fees = if consider_fees {
            self.assumptions.fee_rate.apply(total_transaction_amount)
        } else {
            Money::zero()
        };
        let estimated_tax_impact = if consider_taxes {
            self.assumptions.tax_rate.apply(total_transaction_amount)
        } else {
            Money::zero()
        };

        debug!(
            volume = %total_transaction_amount,
            fees = %estimated_fees,
            taxes = %estimated_tax_impact,
            "estimated impact"
        );

        ImpactSummary {
            total_transaction_amount,
            buy_amount: volume_for(TradeAction::Buy),
            sell_amount: volume_for(TradeAction::Sell),
            estimated_fees,
            estimated_tax_impact,
            net_cost: estimated_fees + estimated_tax_impact,
            projected_return_delta: self.assumptions.projected_return_delta,
            projected_risk_delta: self.assumptions.projected_risk_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetClass, Percentage, Priority};

    fn rec(class: AssetClass, action: TradeAction, dollars: i64) -> RebalanceRecommendation {
        RebalanceRecommendation {
            asset_class: class,
            current_weight: Percentage::zero(),
            target_weight: Percentage::zero(),
            current_value: Money::zero(),
            target_value: Money::zero(),
            action,
            action_amount: Money::from_dollars(dollars),
            priority: Priority::High,
            reason: String::new(),
        }
    }

    fn sample() -> Vec<RebalanceRecommendation> {
        vec![
            rec(AssetClass::Stocks, TradeAction::Sell, 10_000),
            rec(AssetClass::Bonds, TradeAction::Buy, 10_000),
        ]
    }

    #[test]
    fn test_fees_and_taxes() {
        let summary = ImpactEstimator::default().estimate(&sample(), true, true);

        assert_eq!(summary.total_transaction_amount, Money::from_dollars(20_000));
        assert_eq!(summary.buy_amount, Money::from_dollars(10_000));
        assert_eq!(summary.sell_amount, Money::from_dollars(10_000));
        assert_eq!(summary.estimated_fees, Money::from_dollars(20));
        assert_eq!(summary.estimated_tax_impact, Money::from_dollars(3_000));
        assert_eq!(summary.net_cost, Money::from_dollars(3_020));
    }

    #[test]
    fn test_toggles_off() {
        let estimator = ImpactEstimator::default();

        let no_taxes = estimator.estimate(&sample(), false, true);
        assert!(no_taxes.estimated_tax_impact.is_zero());
        assert_eq!(no_taxes.net_cost, Money::from_dollars(20));

        let no_fees = estimator.estimate(&sample(), true, false);
        assert!(no_fees.estimated_fees.is_zero());
        assert_eq!(no_fees.net_cost, Money::from_dollars(3_000));

        let neither = estimator.estimate(&sample(), false, false);
        assert!(neither.net_cost.is_zero());
        assert_eq!(neither.total_transaction_amount, Money::from_dollars(20_000));
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let estimator = ImpactEstimator::new(CostAssumptions {
            projected_return_delta: Percentage::from_bps(30),
            projected_risk_delta: Percentage::from_bps(-120),
            ..CostAssumptions::default()
        });
        assert!(estimator.estimate(&[], true, true).is_zero());
    }

    #[test]
    fn test_injected_assumptions() {
        let estimator = ImpactEstimator::new(CostAssumptions {
            fee_rate: Percentage::from_bps(25),
            tax_rate: Percentage::from_percent(20),
            projected_return_delta: Percentage::from_bps(30),
            projected_risk_delta: Percentage::from_bps(-120),
        });

        let summary = estimator.estimate(&sample(), true, true);
        assert_eq!(summary.estimated_fees, Money::from_dollars(50));
        assert_eq!(summary.estimated_tax_impact, Money::from_dollars(4_000));
        assert_eq!(summary.projected_return_delta, Percentage::from_bps(30));
        assert_eq!(summary.projected_risk_delta, Percentage::from_bps(-120));
    }
}
