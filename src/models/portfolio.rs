//! Portfolio snapshot models
//!
//! A [`Portfolio`] is built from caller-supplied holdings: values per asset
//! class are aggregated and each class's weight is derived from the total.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::percentage::Percentage;
use crate::error::{PolicyError, PolicyResult};

/// Broad asset class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Stocks,
    Bonds,
    RealEstate,
    Cash,
    Commodities,
    Crypto,
    Alternative,
}

impl AssetClass {
    pub fn all() -> &'static [Self] {
        &[
            Self::Stocks,
            Self::Bonds,
            Self::RealEstate,
            Self::Cash,
            Self::Commodities,
            Self::Crypto,
            Self::Alternative,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Stocks => "Stocks",
            Self::Bonds => "Bonds",
            Self::RealEstate => "Real Estate",
            Self::Cash => "Cash",
            Self::Commodities => "Commodities",
            Self::Crypto => "Cryptocurrency",
            Self::Alternative => "Alternative",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for AssetClass {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match key.as_str() {
            "stocks" | "stock" | "equity" | "equities" => Ok(Self::Stocks),
            "bonds" | "bond" | "fixedincome" => Ok(Self::Bonds),
            "realestate" | "reit" | "reits" => Ok(Self::RealEstate),
            "cash" => Ok(Self::Cash),
            "commodities" | "commodity" => Ok(Self::Commodities),
            "crypto" | "cryptocurrency" => Ok(Self::Crypto),
            "alternative" | "alternatives" => Ok(Self::Alternative),
            _ => Err(PolicyError::asset_class_not_found(s.trim())),
        }
    }
}

/// A raw holding as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub asset_class: AssetClass,
    pub current_value: Money,
}

impl Holding {
    pub fn new(asset_class: AssetClass, current_value: Money) -> Self {
        Self {
            asset_class,
            current_value,
        }
    }
}

/// One asset class in the portfolio with its derived weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioPosition {
    pub asset_class: AssetClass,
    pub current_value: Money,
    /// `current_value / total_portfolio_value`
    pub current_weight: Percentage,
}

/// Immutable portfolio snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Portfolio {
    positions: Vec<PortfolioPosition>,
    total_value: Money,
}

impl Portfolio {
    /// Build a snapshot from holdings.
    ///
    /// Holdings of the same class are merged, keeping the order in which each
    /// class first appears. Negative values are rejected.
    pub fn from_holdings(holdings: impl IntoIterator<Item = Holding>) -> PolicyResult<Self> {
        let mut merged: Vec<(AssetClass, Money)> = Vec::new();

        for holding in holdings {
            if holding.current_value.is_negative() {
                return Err(PolicyError::Validation(format!(
                    "{} holding has a negative value ({})",
                    holding.asset_class, holding.current_value
                )));
            }

            match merged.iter_mut().find(|(class, _)| *class == holding.asset_class) {
                Some((_, value)) => *value += holding.current_value,
                None => merged.push((holding.asset_class, holding.current_value)),
            }
        }

        let total_value: Money = merged.iter().map(|(_, value)| *value).sum();
        let positions = merged
            .into_iter()
            .map(|(asset_class, current_value)| PortfolioPosition {
                asset_class,
                current_value,
                current_weight: Percentage::weight_of(current_value, total_value),
            })
            .collect();

        Ok(Self {
            positions,
            total_value,
        })
    }

    pub fn positions(&self) -> &[PortfolioPosition] {
        &self.positions
    }

    pub fn total_value(&self) -> Money {
        self.total_value
    }

    pub fn position(&self, asset_class: AssetClass) -> Option<&PortfolioPosition> {
        self.positions.iter().find(|p| p.asset_class == asset_class)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(class: AssetClass, dollars: i64) -> Holding {
        Holding::new(class, Money::from_dollars(dollars))
    }

    #[test]
    fn test_weights_from_values() {
        let portfolio = Portfolio::from_holdings(vec![
            holding(AssetClass::Stocks, 70_000),
            holding(AssetClass::Bonds, 20_000),
            holding(AssetClass::RealEstate, 8_000),
            holding(AssetClass::Cash, 2_000),
        ])
        .unwrap();

        assert_eq!(portfolio.total_value(), Money::from_dollars(100_000));
        assert_eq!(
            portfolio.position(AssetClass::Stocks).unwrap().current_weight,
            Percentage::from_percent(70)
        );
        assert_eq!(
            portfolio.position(AssetClass::Cash).unwrap().current_weight,
            Percentage::from_percent(2)
        );
    }

    #[test]
    fn test_duplicate_classes_are_merged_in_first_seen_order() {
        let portfolio = Portfolio::from_holdings(vec![
            holding(AssetClass::Bonds, 10),
            holding(AssetClass::Stocks, 20),
            holding(AssetClass::Bonds, 10),
        ])
        .unwrap();

        let classes: Vec<AssetClass> =
            portfolio.positions().iter().map(|p| p.asset_class).collect();
        assert_eq!(classes, vec![AssetClass::Bonds, AssetClass::Stocks]);
        assert_eq!(
            portfolio.position(AssetClass::Bonds).unwrap().current_value,
            Money::from_dollars(20)
        );
    }

    #[test]
    fn test_empty_portfolio_has_zero_weights() {
        let portfolio = Portfolio::from_holdings(vec![holding(AssetClass::Cash, 0)]).unwrap();
        assert!(portfolio.total_value().is_zero());
        assert_eq!(portfolio.positions()[0].current_weight, Percentage::zero());

        assert!(Portfolio::from_holdings(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_negative_holding_rejected() {
        let err = Portfolio::from_holdings(vec![holding(AssetClass::Crypto, -1)]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_asset_class_parse() {
        assert_eq!("Real Estate".parse::<AssetClass>().unwrap(), AssetClass::RealEstate);
        assert_eq!("real_estate".parse::<AssetClass>().unwrap(), AssetClass::RealEstate);
        assert_eq!("equities".parse::<AssetClass>().unwrap(), AssetClass::Stocks);
        assert!("tulips".parse::<AssetClass>().unwrap_err().is_not_found());
    }

    #[test]
    fn test_asset_class_serde() {
        let json = serde_json::to_string(&AssetClass::RealEstate).unwrap();
        assert_eq!(json, "\"real_estate\"");
    }
}
