//! Cost assumptions and the impact summary of a recommendation set

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::percentage::Percentage;

/// Flat-rate placeholders used to estimate the cost of a rebalance.
///
/// These are approximations for planning, not a fee schedule or tax law. The
/// projected deltas are presentation figures supplied by the caller; nothing
/// in the engine derives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostAssumptions {
    /// Transaction fee as a share of traded volume
    #[serde(default = "default_fee_rate")]
    pub fee_rate: Percentage,

    /// Capital-gains tax as a share of traded volume
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Percentage,

    /// Expected change in annual return after rebalancing
    #[serde(default)]
    pub projected_return_delta: Percentage,

    /// Expected change in portfolio volatility after rebalancing
    #[serde(default)]
    pub projected_risk_delta: Percentage,
}

fn default_fee_rate() -> Percentage {
    Percentage::from_bps(10)
}

fn default_tax_rate() -> Percentage {
    Percentage::from_percent(15)
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            fee_rate: default_fee_rate(),
            tax_rate: default_tax_rate(),
            projected_return_delta: Percentage::zero(),
            projected_risk_delta: Percentage::zero(),
        }
    }
}

/// Aggregate cost and effect of a recommendation set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub total_transaction_amount: Money,
    pub buy_amount: Money,
    pub sell_amount: Money,
    pub estimated_fees: Money,
    pub estimated_tax_impact: Money,
    /// `estimated_fees + estimated_tax_impact`
    pub net_cost: Money,
    pub projected_return_delta: Percentage,
    pub projected_risk_delta: Percentage,
}

impl ImpactSummary {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_assumptions() {
        let assumptions = CostAssumptions::default();
        assert_eq!(assumptions.fee_rate.to_string(), "0.10%");
        assert_eq!(assumptions.tax_rate, Percentage::from_percent(15));
        assert!(assumptions.projected_return_delta.is_zero());
    }

    #[test]
    fn test_partial_assumptions_fill_defaults() {
        let assumptions: CostAssumptions =
            serde_json::from_str(r#"{"projected_return_delta": 0.4}"#).unwrap();
        assert_eq!(assumptions.fee_rate, Percentage::from_bps(10));
        assert_eq!(assumptions.projected_return_delta, Percentage::from_bps(40));
    }

    #[test]
    fn test_default_summary_is_zero() {
        assert!(ImpactSummary::default().is_zero());
    }
}
