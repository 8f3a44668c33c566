//! Allocation rule table
//!
//! The named income-split rules form a closed set. Each kind maps to an
//! immutable [`AllocationRule`] record; the custom rule carries
//! caller-supplied bucket percentages that are applied literally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Bucket;
use super::percentage::Percentage;
use crate::error::{PolicyError, PolicyResult};

/// The named allocation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AllocationRuleKind {
    #[default]
    #[serde(rename = "75_15_10")]
    SeventyFifteenTen,
    #[serde(rename = "50_30_20")]
    FiftyThirtyTwenty,
    #[serde(rename = "80_20")]
    EightyTwenty,
    #[serde(rename = "custom")]
    Custom,
}

impl AllocationRuleKind {
    /// Every rule kind in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::SeventyFifteenTen,
            Self::FiftyThirtyTwenty,
            Self::EightyTwenty,
            Self::Custom,
        ]
    }

    /// Stable identifier used in config and scenario files
    pub fn id(&self) -> &'static str {
        match self {
            Self::SeventyFifteenTen => "75_15_10",
            Self::FiftyThirtyTwenty => "50_30_20",
            Self::EightyTwenty => "80_20",
            Self::Custom => "custom",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SeventyFifteenTen => "75/15/10 Rule",
            Self::FiftyThirtyTwenty => "50/30/20 Rule",
            Self::EightyTwenty => "80/20 Rule",
            Self::Custom => "Custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SeventyFifteenTen => "75% needs, 15% wants, 10% savings",
            Self::FiftyThirtyTwenty => "50% needs, 30% wants, 20% savings",
            Self::EightyTwenty => "80% spending, 20% savings",
            Self::Custom => "Your own split across needs, wants and savings",
        }
    }

    /// Fixed bucket targets; `None` for the custom rule
    pub fn targets(&self) -> Option<BucketTargets> {
        let (need, want, save) = match self {
            Self::SeventyFifteenTen => (75, 15, 10),
            Self::FiftyThirtyTwenty => (50, 30, 20),
            Self::EightyTwenty => (80, 0, 20),
            Self::Custom => return None,
        };
        Some(BucketTargets {
            need: Percentage::from_percent(need),
            want: Percentage::from_percent(want),
            save: Percentage::from_percent(save),
        })
    }
}

impl fmt::Display for AllocationRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for AllocationRuleKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == '/' { '_' } else { c })
            .collect();

        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| PolicyError::rule_not_found(s.trim()))
    }
}

/// Target percentage per bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BucketTargets {
    pub need: Percentage,
    pub want: Percentage,
    pub save: Percentage,
}

impl BucketTargets {
    pub fn get(&self, bucket: Bucket) -> Percentage {
        match bucket {
            Bucket::Need => self.need,
            Bucket::Want => self.want,
            Bucket::Save => self.save,
        }
    }

    /// Sum of the three targets
    pub fn sum(&self) -> Percentage {
        self.need + self.want + self.save
    }
}

/// Caller-supplied percentages for the custom rule
///
/// Each value must lie within 0% to 100%; their sum is not checked here. Callers that want to warn use [`AllocationRule::is_balanced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomPercentages(BucketTargets);

impl CustomPercentages {
    pub fn new(need: Percentage, want: Percentage, save: Percentage) -> PolicyResult<Self> {
        for (bucket, value) in [(Bucket::Need, need), (Bucket::Want, want), (Bucket::Save, save)] {
            if value.is_negative() {
                return Err(PolicyError::Validation(format!(
                    "{} percentage cannot be negative ({})",
                    bucket, value
                )));
            }
            if value > Percentage::hundred() {
                return Err(PolicyError::Validation(format!(
                    "{} percentage cannot exceed 100% ({})",
                    bucket, value
                )));
            }
        }
        Ok(Self(BucketTargets { need, want, save }))
    }

    /// Parse "need,want,save", e.g. "60,25,15"
    pub fn parse(s: &str) -> PolicyResult<Self> {
        let parts: Vec<&str> = s.split([',', '/']).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(PolicyError::Validation(format!(
                "Custom split '{}' must have three values: need,want,save",
                s
            )));
        }

        let mut values = [Percentage::zero(); 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = Percentage::parse(part)
                .map_err(|e| PolicyError::Validation(e.to_string()))?;
        }

        Self::new(values[0], values[1], values[2])
    }

    pub fn targets(&self) -> BucketTargets {
        self.0
    }
}

impl<'de> Deserialize<'de> for CustomPercentages {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let targets = BucketTargets::deserialize(deserializer)?;
        Self::new(targets.need, targets.want, targets.save).map_err(serde::de::Error::custom)
    }
}

/// An allocation rule record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRule {
    pub kind: AllocationRuleKind,
    pub name: String,
    pub description: String,
    pub bucket_targets: BucketTargets,
}

impl AllocationRule {
    /// Look up a named rule.
    ///
    /// `Custom` has no fixed targets; asking for it here yields an all-zero
    /// record. Use [`AllocationRule::custom`] to supply the percentages.
    pub fn builtin(kind: AllocationRuleKind) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            bucket_targets: kind.targets().unwrap_or_default(),
        }
    }

    /// Build the custom rule from caller-supplied percentages
    pub fn custom(percentages: CustomPercentages) -> Self {
        let targets = percentages.targets();
        Self {
            kind: AllocationRuleKind::Custom,
            name: AllocationRuleKind::Custom.name().to_string(),
            description: format!(
                "{} needs, {} wants, {} savings",
                targets.need, targets.want, targets.save
            ),
            bucket_targets: targets,
        }
    }

    /// Every named (non-custom) rule
    pub fn catalog() -> Vec<Self> {
        AllocationRuleKind::all()
            .iter()
            .filter(|kind| **kind != AllocationRuleKind::Custom)
            .map(|kind| Self::builtin(*kind))
            .collect()
    }

    pub fn target_for(&self, bucket: Bucket) -> Percentage {
        self.bucket_targets.get(bucket)
    }

    pub fn target_sum(&self) -> Percentage {
        self.bucket_targets.sum()
    }

    /// True when the bucket targets add up to exactly 100%
    pub fn is_balanced(&self) -> bool {
        self.target_sum() == Percentage::hundred()
    }
}

/// Either a named rule or a custom split, as chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum RuleSelection {
    Named(AllocationRuleKind),
    Custom(CustomPercentages),
}

impl RuleSelection {
    /// Resolve into a concrete rule record
    pub fn resolve(&self) -> PolicyResult<AllocationRule> {
        match self {
            Self::Named(AllocationRuleKind::Custom) => Err(PolicyError::Validation(
                "The custom rule needs need/want/save percentages".to_string(),
            )),
            Self::Named(kind) => Ok(AllocationRule::builtin(*kind)),
            Self::Custom(percentages) => Ok(AllocationRule::custom(*percentages)),
        }
    }
}
