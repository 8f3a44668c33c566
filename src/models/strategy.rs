//! Rebalance strategies
//!
//! Named strategies are a closed enum mapped to immutable target-weight
//! records. Age-based strategies and glide paths are derived on demand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::percentage::Percentage;
use super::portfolio::AssetClass;
use crate::error::{PolicyError, PolicyResult};

/// The named rebalance strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceStrategyKind {
    Conservative,
    #[default]
    Moderate,
    Balanced,
    Aggressive,
    AllWeather,
    ThreeFund,
}

impl RebalanceStrategyKind {
    pub fn all() -> &'static [Self] {
        &[
            Self::Conservative,
            Self::Moderate,
            Self::Balanced,
            Self::Aggressive,
            Self::AllWeather,
            Self::ThreeFund,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
            Self::AllWeather => "all_weather",
            Self::ThreeFund => "three_fund",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative Income",
            Self::Moderate => "Moderate Growth",
            Self::Balanced => "Balanced Growth",
            Self::Aggressive => "Aggressive Growth",
            Self::AllWeather => "All Weather",
            Self::ThreeFund => "Three-Fund Portfolio",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Conservative => "Low-risk portfolio focused on income generation",
            Self::Moderate => "Growth-tilted mix with a bond cushion",
            Self::Balanced => "Balanced approach between growth and stability",
            Self::Aggressive => "High-growth portfolio for long-term wealth building",
            Self::AllWeather => "Risk parity mix meant to hold up in any economic environment",
            Self::ThreeFund => "Simple, low-cost total market index approach",
        }
    }

    pub fn risk_tolerance(&self) -> RiskTolerance {
        match self {
            Self::Conservative => RiskTolerance::Conservative,
            Self::Moderate => RiskTolerance::ModeratelyAggressive,
            Self::Balanced | Self::ThreeFund => RiskTolerance::Moderate,
            Self::Aggressive => RiskTolerance::Aggressive,
            Self::AllWeather => RiskTolerance::ModeratelyConservative,
        }
    }

    pub fn rebalancing_frequency(&self) -> RebalancingFrequency {
        match self {
            Self::Conservative | Self::Moderate | Self::Balanced => RebalancingFrequency::Quarterly,
            Self::Aggressive => RebalancingFrequency::SemiAnnually,
            Self::AllWeather | Self::ThreeFund => RebalancingFrequency::Annually,
        }
    }

    /// Target weights in basis points
    fn weights(&self) -> &'static [(AssetClass, i64)] {
        use AssetClass::*;
        match self {
            Self::Conservative => &[(Stocks, 2000), (Bonds, 7000), (Cash, 1000)],
            Self::Moderate => &[(Stocks, 6000), (Bonds, 3000), (RealEstate, 800), (Cash, 200)],
            Self::Balanced => &[(Stocks, 5000), (Bonds, 4000), (RealEstate, 500), (Cash, 500)],
            Self::Aggressive => &[
                (Stocks, 8000),
                (RealEstate, 1000),
                (Commodities, 500),
                (Alternative, 500),
            ],
            Self::AllWeather => &[
                (Stocks, 3000),
                (Bonds, 5500),
                (Commodities, 750),
                (RealEstate, 750),
            ],
            Self::ThreeFund => &[(Stocks, 7000), (Bonds, 3000)],
        }
    }
}

impl fmt::Display for RebalanceStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for RebalanceStrategyKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| PolicyError::strategy_not_found(s.trim()))
    }
}

/// Investor risk tolerance, used for age-based strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    ModeratelyConservative,
    Moderate,
    ModeratelyAggressive,
    Aggressive,
    VeryAggressive,
}

impl RiskTolerance {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::ModeratelyConservative => "Moderately Conservative",
            Self::Moderate => "Moderate",
            Self::ModeratelyAggressive => "Moderately Aggressive",
            Self::Aggressive => "Aggressive",
            Self::VeryAggressive => "Very Aggressive",
        }
    }

    /// Starting point of the "base minus age" stock rule
    fn stock_base(&self) -> u32 {
        match self {
            Self::Conservative => 80,
            Self::ModeratelyConservative => 90,
            Self::Moderate => 100,
            Self::ModeratelyAggressive => 110,
            Self::Aggressive => 120,
            Self::VeryAggressive => 130,
        }
    }

    /// Tolerance used by the glide path at a given age
    pub fn for_age(age: u32) -> Self {
        if age < 35 {
            Self::Aggressive
        } else if age < 50 {
            Self::ModeratelyAggressive
        } else if age < 60 {
            Self::Moderate
        } else {
            Self::ModeratelyConservative
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for RiskTolerance {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderately_conservative" => Ok(Self::ModeratelyConservative),
            "moderate" => Ok(Self::Moderate),
            "moderately_aggressive" => Ok(Self::ModeratelyAggressive),
            "aggressive" => Ok(Self::Aggressive),
            "very_aggressive" => Ok(Self::VeryAggressive),
            other => Err(PolicyError::Validation(format!(
                "Unknown risk tolerance '{}'",
                other
            ))),
        }
    }
}

/// How often a strategy expects to be rebalanced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalancingFrequency {
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    /// Whenever any class drifts this far from target
    ThresholdBased(Percentage),
}

impl Default for RebalancingFrequency {
    fn default() -> Self {
        Self::ThresholdBased(Percentage::from_percent(5))
    }
}

impl fmt::Display for RebalancingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.pad("monthly"),
            Self::Quarterly => f.pad("quarterly"),
            Self::SemiAnnually => f.pad("semi-annually"),
            Self::Annually => f.pad("annually"),
            Self::ThresholdBased(drift) => f.pad(&format!("on {} drift", drift)),
        }
    }
}

/// A target-weight map across asset classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceStrategy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unknown for caller-defined strategies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<RiskTolerance>,
    #[serde(default)]
    pub rebalancing_frequency: RebalancingFrequency,
    pub target_weights: BTreeMap<AssetClass, Percentage>,
}

impl RebalanceStrategy {
    /// Look up a named strategy
    pub fn builtin(kind: RebalanceStrategyKind) -> Self {
        Self {
            id: kind.id().to_string(),
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            risk_tolerance: Some(kind.risk_tolerance()),
            rebalancing_frequency: kind.rebalancing_frequency(),
            target_weights: kind
                .weights()
                .iter()
                .map(|(class, bps)| (*class, Percentage::from_bps(*bps)))
                .collect(),
        }
    }

    /// Every named strategy
    pub fn catalog() -> Vec<Self> {
        RebalanceStrategyKind::all()
            .iter()
            .map(|kind| Self::builtin(*kind))
            .collect()
    }

    /// A caller-defined strategy
    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        target_weights: BTreeMap<AssetClass, Percentage>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            risk_tolerance: None,
            rebalancing_frequency: RebalancingFrequency::default(),
            target_weights,
        }
    }

    /// "Base minus age" allocation for an investor.
    ///
    /// Stocks are clamped to 20..=90%, 10% is reserved for real estate and
    /// cash, and bonds take the rest.
    pub fn age_based(age: u32, risk_tolerance: RiskTolerance) -> Self {
        let stocks = risk_tolerance.stock_base().saturating_sub(age).clamp(20, 90);
        let bonds = 90 - stocks;

        let mut target_weights = BTreeMap::new();
        target_weights.insert(AssetClass::Stocks, Percentage::from_percent(stocks as i64));
        target_weights.insert(AssetClass::Bonds, Percentage::from_percent(bonds as i64));
        target_weights.insert(AssetClass::RealEstate, Percentage::from_percent(5));
        target_weights.insert(AssetClass::Cash, Percentage::from_percent(5));

        Self {
            id: format!("age_{}", age),
            name: format!("Age-Based Allocation (Age {})", age),
            description: format!("Age-appropriate allocation for a {}-year-old investor", age),
            risk_tolerance: Some(risk_tolerance),
            rebalancing_frequency: RebalancingFrequency::Annually,
            target_weights,
        }
    }

    /// Age-based strategies every five years from now until retirement
    pub fn glide_path(current_age: u32, retirement_age: u32) -> PolicyResult<Vec<(u32, Self)>> {
        if retirement_age < current_age {
            return Err(PolicyError::Validation(format!(
                "Retirement age {} is before current age {}",
                retirement_age, current_age
            )));
        }

        Ok((current_age..=retirement_age)
            .step_by(5)
            .map(|age| (age, Self::age_based(age, RiskTolerance::for_age(age))))
            .collect())
    }

    pub fn target_for(&self, asset_class: AssetClass) -> Option<Percentage> {
        self.target_weights.get(&asset_class).copied()
    }

    pub fn target_sum(&self) -> Percentage {
        self.target_weights.values().copied().sum()
    }

    /// Targets may leave cash implicit but must not exceed 100%
    pub fn is_within_limit(&self) -> bool {
        self.target_sum() <= Percentage::hundred()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_strategies_sum_to_hundred() {
        for strategy in RebalanceStrategy::catalog() {
            assert_eq!(
                strategy.target_sum(),
                Percentage::hundred(),
                "{} does not sum to 100",
                strategy.name
            );
            assert!(strategy.is_within_limit());
        }
    }

    #[test]
    fn test_moderate_targets() {
        let strategy = RebalanceStrategy::builtin(RebalanceStrategyKind::Moderate);
        assert_eq!(strategy.target_for(AssetClass::Stocks), Some(Percentage::from_percent(60)));
        assert_eq!(strategy.target_for(AssetClass::Bonds), Some(Percentage::from_percent(30)));
        assert_eq!(strategy.target_for(AssetClass::Crypto), None);
    }

    #[test]
    fn test_strategy_risk_and_frequency() {
        let conservative = RebalanceStrategy::builtin(RebalanceStrategyKind::Conservative);
        assert_eq!(conservative.risk_tolerance, Some(RiskTolerance::Conservative));
        assert_eq!(conservative.rebalancing_frequency, RebalancingFrequency::Quarterly);

        let aggressive = RebalanceStrategy::builtin(RebalanceStrategyKind::Aggressive);
        assert_eq!(aggressive.rebalancing_frequency, RebalancingFrequency::SemiAnnually);
        assert_eq!(aggressive.rebalancing_frequency.to_string(), "semi-annually");

        let age_based = RebalanceStrategy::age_based(40, RiskTolerance::ModeratelyAggressive);
        assert_eq!(age_based.risk_tolerance, Some(RiskTolerance::ModeratelyAggressive));
        assert_eq!(age_based.rebalancing_frequency, RebalancingFrequency::Annually);

        let custom = RebalanceStrategy::custom("mine", "Mine", BTreeMap::new());
        assert_eq!(custom.risk_tolerance, None);
        assert_eq!(custom.rebalancing_frequency.to_string(), "on 5.00% drift");
    }

    #[test]
    fn test_strategy_kind_parse() {
        assert_eq!(
            "all-weather".parse::<RebalanceStrategyKind>().unwrap(),
            RebalanceStrategyKind::AllWeather
        );
        assert_eq!(
            "Three Fund".parse::<RebalanceStrategyKind>().unwrap(),
            RebalanceStrategyKind::ThreeFund
        );
        assert!("yolo".parse::<RebalanceStrategyKind>().unwrap_err().is_not_found());
    }

    #[test]
    fn test_age_based_allocation() {
        let strategy = RebalanceStrategy::age_based(30, RiskTolerance::Moderate);
        assert_eq!(strategy.target_for(AssetClass::Stocks), Some(Percentage::from_percent(70)));
        assert_eq!(strategy.target_for(AssetClass::Bonds), Some(Percentage::from_percent(20)));
        assert_eq!(strategy.target_sum(), Percentage::hundred());
    }

    #[test]
    fn test_age_based_allocation_clamps() {
        let young = RebalanceStrategy::age_based(20, RiskTolerance::VeryAggressive);
        assert_eq!(young.target_for(AssetClass::Stocks), Some(Percentage::from_percent(90)));
        assert_eq!(young.target_for(AssetClass::Bonds), Some(Percentage::zero()));

        let old = RebalanceStrategy::age_based(95, RiskTolerance::Conservative);
        assert_eq!(old.target_for(AssetClass::Stocks), Some(Percentage::from_percent(20)));
        assert_eq!(old.target_for(AssetClass::Bonds), Some(Percentage::from_percent(70)));
    }

    #[test]
    fn test_glide_path() {
        let path = RebalanceStrategy::glide_path(30, 65).unwrap();
        let ages: Vec<u32> = path.iter().map(|(age, _)| *age).collect();
        assert_eq!(ages, vec![30, 35, 40, 45, 50, 55, 60, 65]);

        // 30 is aggressive: 120 - 30 = 90
        assert_eq!(
            path[0].1.target_for(AssetClass::Stocks),
            Some(Percentage::from_percent(90))
        );
        // 65 is moderately conservative: 90 - 65 = 25
        assert_eq!(
            path[7].1.target_for(AssetClass::Stocks),
            Some(Percentage::from_percent(25))
        );

        assert!(RebalanceStrategy::glide_path(50, 40).unwrap_err().is_validation());
    }

    #[test]
    fn test_custom_strategy_limit() {
        let mut weights = BTreeMap::new();
        weights.insert(AssetClass::Stocks, Percentage::from_percent(70));
        weights.insert(AssetClass::Bonds, Percentage::from_percent(25));
        let strategy = RebalanceStrategy::custom("mine", "Mine", weights.clone());
        assert!(strategy.is_within_limit());

        weights.insert(AssetClass::Cash, Percentage::from_percent(10));
        let over = RebalanceStrategy::custom("over", "Over", weights);
        assert!(!over.is_within_limit());
    }
}
