//! Scenario files for the command line
//!
//! A budget scenario names an income, a rule and the categories to fund. A
//! portfolio scenario lists holdings and, optionally, the strategy and knobs
//! for rebalancing. Both load from JSON or YAML. Money is written as a string
//! ("5000", "$1,250.50") so that amounts stay exact.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PolicyError, PolicyResult};
use crate::file_io::read_document;
use crate::models::{
    AllocationRuleKind, AssetClass, Bucket, BudgetCategory, CustomPercentages, Holding, Money,
    Percentage, Portfolio, RebalanceStrategy, RebalanceStrategyKind, RebalanceThreshold,
    RuleSelection,
};
use crate::services::RebalanceConfig;

fn parse_money(field: &str, value: &str) -> PolicyResult<Money> {
    Money::parse(value).map_err(|e| PolicyError::Scenario(format!("{}: {}", field, e)))
}

/// One category entry in a budget scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub bucket: Bucket,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<String>,
}

/// Income, rule and categories to allocate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetScenario {
    pub income: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<AllocationRuleKind>,
    /// Needed when `rule` is `custom`; implies it when `rule` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomPercentages>,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
}

impl BudgetScenario {
    pub fn load<P: AsRef<Path>>(path: P) -> PolicyResult<Self> {
        let path = path.as_ref();
        let scenario: Self = read_document(path)?;
        info!(path = %path.display(), categories = scenario.categories.len(), "loaded budget scenario");
        Ok(scenario)
    }

    pub fn income(&self) -> PolicyResult<Money> {
        parse_money("income", &self.income)
    }

    /// Which rule this scenario asks for, falling back to `default_rule`
    pub fn rule_selection(&self, default_rule: AllocationRuleKind) -> PolicyResult<RuleSelection> {
        match (self.rule, self.custom) {
            (Some(AllocationRuleKind::Custom) | None, Some(custom)) => Ok(RuleSelection::Custom(custom)),
            (Some(kind), Some(_)) => Err(PolicyError::Scenario(format!(
                "custom percentages given but rule is '{}'",
                kind.id()
            ))),
            (Some(kind), None) => Ok(RuleSelection::Named(kind)),
            (None, None) => Ok(RuleSelection::Named(default_rule)),
        }
    }

    /// Build validated categories in file order
    pub fn categories(&self) -> PolicyResult<Vec<BudgetCategory>> {
        self.categories
            .iter()
            .map(|entry| {
                let mut category = BudgetCategory::new(entry.name.trim(), entry.bucket);
                if let Some(spent) = &entry.spent {
                    category = category.with_spent(parse_money(&entry.name, spent)?);
                }
                category
                    .validate()
                    .map_err(|e| PolicyError::Scenario(format!("category '{}': {}", entry.name, e)))?;
                Ok(category)
            })
            .collect()
    }
}

/// One holding entry in a portfolio scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingEntry {
    pub asset_class: AssetClass,
    pub value: String,
}

/// Holdings plus optional rebalance choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioScenario {
    pub holdings: Vec<HoldingEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<RebalanceStrategyKind>,
    /// Replaces the named strategy when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_targets: Option<BTreeMap<AssetClass, Percentage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consider_taxes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consider_fees: Option<bool>,
}

impl PortfolioScenario {
    pub fn load<P: AsRef<Path>>(path: P) -> PolicyResult<Self> {
        let path = path.as_ref();
        let scenario: Self = read_document(path)?;
        info!(path = %path.display(), holdings = scenario.holdings.len(), "loaded portfolio scenario");
        Ok(scenario)
    }

    pub fn portfolio(&self) -> PolicyResult<Portfolio> {
        let holdings = self
            .holdings
            .iter()
            .map(|h| Ok(Holding::new(h.asset_class, parse_money(h.asset_class.name(), &h.value)?)))
            .collect::<PolicyResult<Vec<_>>>()?;
        Portfolio::from_holdings(holdings)
    }

    /// The strategy to rebalance against, falling back to `default_strategy`
    pub fn strategy(&self, default_strategy: RebalanceStrategyKind) -> PolicyResult<RebalanceStrategy> {
        let Some(targets) = &self.custom_targets else {
            return Ok(RebalanceStrategy::builtin(self.strategy.unwrap_or(default_strategy)));
        };

        if let Some((class, weight)) = targets.iter().find(|(_, w)| w.is_negative()) {
            return Err(PolicyError::Validation(format!(
                "Target for {} cannot be negative ({})",
                class, weight
            )));
        }

        let strategy = RebalanceStrategy::custom("custom", "Custom Targets", targets.clone());
        if !strategy.is_within_limit() {
            return Err(PolicyError::Validation(format!(
                "Custom targets sum to {}, more than 100%",
                strategy.target_sum()
            )));
        }
        Ok(strategy)
    }

    /// Overlay this scenario's threshold and toggles on `base`
    pub fn rebalance_config(&self, base: RebalanceConfig) -> PolicyResult<RebalanceConfig> {
        Ok(RebalanceConfig {
            threshold: match self.threshold {
                Some(pct) => RebalanceThreshold::new(pct)?,
                None => base.threshold,
            },
            consider_taxes: self.consider_taxes.unwrap_or(base.consider_taxes),
            consider_fees: self.consider_fees.unwrap_or(base.consider_fees),
            assumptions: base.assumptions,
        })
    }
}
