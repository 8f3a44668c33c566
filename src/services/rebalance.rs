//! Rebalance pipeline: evaluate, recommend, estimate

use serde::{Deserialize, Serialize};
use tracing::info;

use super::impact::ImpactEstimator;
use super::recommender::RebalanceRecommender;
use super::threshold::ThresholdEvaluator;
use crate::models::{
    CostAssumptions, Deviation, ImpactSummary, Money, Portfolio, RebalanceRecommendation,
    RebalanceStrategy, RebalanceThreshold,
};

/// Caller-chosen knobs for one rebalance analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceConfig {
    pub threshold: RebalanceThreshold,
    pub consider_taxes: bool,
    pub consider_fees: bool,
    pub assumptions: CostAssumptions,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            threshold: RebalanceThreshold::default(),
            consider_taxes: true,
            consider_fees: true,
            assumptions: CostAssumptions::default(),
        }
    }
}

/// Everything the presentation layer needs for one portfolio and strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebalanceAnalysis {
    pub strategy: RebalanceStrategy,
    pub threshold: RebalanceThreshold,
    pub total_value: Money,
    pub deviations: Vec<Deviation>,
    pub recommendations: Vec<RebalanceRecommendation>,
    pub impact: ImpactSummary,
}

impl RebalanceAnalysis {
    /// No asset class is out of range
    pub fn is_balanced(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// Runs the full threshold → recommendation → impact pipeline
pub struct RebalanceService {
    config: RebalanceConfig,
}

impl RebalanceService {
    pub fn new(config: RebalanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RebalanceConfig {
        &self.config
    }

    pub fn analyze(&self, portfolio: &Portfolio, strategy: &RebalanceStrategy) -> RebalanceAnalysis {
        let deviations =
            ThresholdEvaluator::new(self.config.threshold).evaluate(portfolio.positions(), strategy);
        let recommendations =
            RebalanceRecommender::new().recommend(&deviations, portfolio.total_value());
        let impact = ImpactEstimator::new(self.config.assumptions).estimate(
            &recommendations,
            self.config.consider_taxes,
            self.config.consider_fees,
        );

        info!(
            strategy = %strategy.id,
            threshold = %self.config.threshold,
            recommendations = recommendations.len(),
            "rebalance analysis complete"
        );

        RebalanceAnalysis {
            strategy: strategy.clone(),
            threshold: self.config.threshold,
            total_value: portfolio.total_value(),
            deviations,
            recommendations,
            impact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetClass, Holding, Priority, RebalanceStrategyKind, TradeAction};

    fn scenario_portfolio() -> Portfolio {
        Portfolio::from_holdings(vec![
            Holding::new(AssetClass::Stocks, Money::from_dollars(70_000)),
            Holding::new(AssetClass::Bonds, Money::from_dollars(20_000)),
            Holding::new(AssetClass::RealEstate, Money::from_dollars(8_000)),
            Holding::new(AssetClass::Cash, Money::from_dollars(2_000)),
        ])
        .unwrap()
    }

    #[test]
    fn test_moderate_scenario() {
        let strategy = RebalanceStrategy::builtin(RebalanceStrategyKind::Moderate);
        let analysis = RebalanceService::new(RebalanceConfig::default())
            .analyze(&scenario_portfolio(), &strategy);

        assert!(!analysis.is_balanced());
        assert_eq!(analysis.deviations.len(), 4);
        assert_eq!(analysis.recommendations.len(), 2);

        let stocks = &analysis.recommendations[0];
        assert_eq!(stocks.asset_class, AssetClass::Stocks);
        assert_eq!(stocks.action, TradeAction::Sell);
        assert_eq!(stocks.action_amount, Money::from_dollars(10_000));
        // exactly 10.00% sits in the medium band
        assert_eq!(stocks.priority, Priority::Medium);

        let bonds = &analysis.recommendations[1];
        assert_eq!(bonds.asset_class, AssetClass::Bonds);
        assert_eq!(bonds.action, TradeAction::Buy);
        assert_eq!(bonds.action_amount, Money::from_dollars(10_000));
        assert_eq!(bonds.priority, Priority::Medium);

        assert_eq!(analysis.impact.total_transaction_amount, Money::from_dollars(20_000));
        assert_eq!(analysis.impact.net_cost, Money::from_dollars(3_020));
    }

    #[test]
    fn test_balanced_portfolio() {
        let strategy = RebalanceStrategy::builtin(RebalanceStrategyKind::Moderate);
        let portfolio = Portfolio::from_holdings(vec![
            Holding::new(AssetClass::Stocks, Money::from_dollars(62_000)),
            Holding::new(AssetClass::Bonds, Money::from_dollars(28_000)),
            Holding::new(AssetClass::RealEstate, Money::from_dollars(8_000)),
            Holding::new(AssetClass::Cash, Money::from_dollars(2_000)),
        ])
        .unwrap();

        let analysis = RebalanceService::new(RebalanceConfig::default()).analyze(&portfolio, &strategy);
        assert!(analysis.is_balanced());
        assert!(analysis.impact.is_zero());
    }

    #[test]
    fn test_threshold_and_toggles_flow_through() {
        let strategy = RebalanceStrategy::builtin(RebalanceStrategyKind::Moderate);
        let config = RebalanceConfig {
            threshold: RebalanceThreshold::new(11).unwrap(),
            consider_taxes: false,
            consider_fees: false,
            ..RebalanceConfig::default()
        };

        let analysis = RebalanceService::new(config).analyze(&scenario_portfolio(), &strategy);
        assert!(analysis.is_balanced());
        assert_eq!(analysis.threshold.percent(), 11);

        let loose = RebalanceConfig {
            consider_taxes: false,
            ..RebalanceConfig::default()
        };
        let analysis = RebalanceService::new(loose).analyze(&scenario_portfolio(), &strategy);
        assert_eq!(analysis.impact.estimated_fees, Money::from_dollars(20));
        assert!(analysis.impact.estimated_tax_impact.is_zero());
    }
}
