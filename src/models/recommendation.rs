//! Deviation and recommendation value objects
//!
//! These are recomputed on every evaluation and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::percentage::Percentage;
use super::portfolio::AssetClass;
use crate::error::{PolicyError, PolicyResult};

/// Minimum deviation, in whole percent, that triggers a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RebalanceThreshold(u8);

impl RebalanceThreshold {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 15;
    pub const DEFAULT: u8 = 5;

    pub fn new(percent: u8) -> PolicyResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&percent) {
            return Err(PolicyError::Validation(format!(
                "Rebalance threshold must be between {}% and {}% (got {}%)",
                Self::MIN,
                Self::MAX,
                percent
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn as_percentage(&self) -> Percentage {
        Percentage::from_percent(self.0 as i64)
    }
}

impl Default for RebalanceThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u8> for RebalanceThreshold {
    type Error = PolicyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RebalanceThreshold> for u8 {
    fn from(threshold: RebalanceThreshold) -> Self {
        threshold.0
    }
}

impl fmt::Display for RebalanceThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Current vs. target weight for one asset class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    pub asset_class: AssetClass,
    pub current_weight: Percentage,
    pub target_weight: Percentage,
    pub current_value: Money,
    /// `abs(current_weight - target_weight)`
    pub deviation: Percentage,
    /// `deviation >= threshold`
    pub out_of_range: bool,
}

impl Deviation {
    /// Signed drift; positive when overweight
    pub fn drift(&self) -> Percentage {
        self.current_weight - self.target_weight
    }

    /// Direction of the trade that would close this deviation
    pub fn direction(&self) -> TradeAction {
        if self.current_weight > self.target_weight {
            TradeAction::Sell
        } else if self.current_weight < self.target_weight {
            TradeAction::Buy
        } else {
            TradeAction::Hold
        }
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        };
        f.pad(s)
    }
}

/// Priority tier; ordered so that `High` is the greatest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Deviations strictly above this are high priority
    pub const HIGH_ABOVE: Percentage = Percentage::from_percent(10);
    /// Deviations at or above this (and not high) are medium priority
    pub const MEDIUM_FROM: Percentage = Percentage::from_percent(7);

    /// Band a deviation: `> 10%` high, `7%..=10%` medium, otherwise low
    pub fn for_deviation(deviation: Percentage) -> Self {
        let magnitude = deviation.abs();
        if magnitude > Self::HIGH_ABOVE {
            Self::High
        } else if magnitude >= Self::MEDIUM_FROM {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.pad(s)
    }
}

/// A recommended trade for one asset class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceRecommendation {
    pub asset_class: AssetClass,
    pub current_weight: Percentage,
    pub target_weight: Percentage,
    pub current_value: Money,
    pub target_value: Money,
    pub action: TradeAction,
    pub action_amount: Money,
    pub priority: Priority,
    pub reason: String,
}

impl RebalanceRecommendation {
    pub fn deviation(&self) -> Percentage {
        (self.current_weight - self.target_weight).abs()
    }
}
