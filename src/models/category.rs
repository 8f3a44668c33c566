//! Budget buckets and categories
//!
//! Every category is tagged with one of three semantic buckets. Allocation
//! rules target buckets, and the distributor spreads each bucket's share over
//! the categories tagged with it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;
use super::money::Money;
use super::percentage::Percentage;

/// Semantic spending bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Need,
    Want,
    Save,
}

impl Bucket {
    /// All buckets in allocation order
    pub const ALL: [Bucket; 3] = [Bucket::Need, Bucket::Want, Bucket::Save];

    /// Plural display name ("Needs", "Wants", "Savings")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Need => "Needs",
            Self::Want => "Wants",
            Self::Save => "Savings",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Bucket {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "need" | "needs" => Ok(Self::Need),
            "want" | "wants" => Ok(Self::Want),
            "save" | "saves" | "saving" | "savings" => Ok(Self::Save),
            other => Err(CategoryValidationError::UnknownBucket(other.to_string())),
        }
    }
}

/// A budget category with its allocation and spending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Unique identifier
    #[serde(default)]
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Bucket this category draws from
    pub bucket: Bucket,

    /// Amount allocated to the category
    #[serde(default)]
    pub allocated_amount: Money,

    /// Amount already spent
    #[serde(default)]
    pub spent_amount: Money,
}

impl BudgetCategory {
    /// Create a new category with nothing allocated or spent
    pub fn new(name: impl Into<String>, bucket: Bucket) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            bucket,
            allocated_amount: Money::zero(),
            spent_amount: Money::zero(),
        }
    }

    /// Builder-style setter for the spent amount
    pub fn with_spent(mut self, spent: Money) -> Self {
        self.spent_amount = spent;
        self
    }

    /// Builder-style setter for the allocated amount
    pub fn with_allocated(mut self, allocated: Money) -> Self {
        self.allocated_amount = allocated;
        self
    }

    /// Allocated minus spent (negative when overspent)
    pub fn remaining_amount(&self) -> Money {
        self.allocated_amount - self.spent_amount
    }

    /// Spent as a share of allocated; zero when nothing is allocated
    pub fn percentage_used(&self) -> Percentage {
        if self.allocated_amount.is_zero() {
            return Percentage::zero();
        }
        Percentage::weight_of(self.spent_amount, self.allocated_amount)
    }

    /// Check if spending exceeds the allocation
    pub fn is_overspent(&self) -> bool {
        self.remaining_amount().is_negative()
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.spent_amount.is_negative() {
            return Err(CategoryValidationError::NegativeSpent);
        }

        Ok(())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeSpent,
    UnknownBucket(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeSpent => write!(f, "Spent amount cannot be negative"),
            Self::UnknownBucket(s) => {
                write!(f, "Unknown bucket '{}'. Valid options: need, want, save", s)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = BudgetCategory::new("Rent", Bucket::Need);

        assert_eq!(category.name, "Rent");
        assert_eq!(category.bucket, Bucket::Need);
        assert!(category.allocated_amount.is_zero());
        assert!(category.spent_amount.is_zero());
    }

    #[test]
    fn test_derived_amounts() {
        let category = BudgetCategory::new("Groceries", Bucket::Need)
            .with_allocated(Money::from_dollars(400))
            .with_spent(Money::from_dollars(100));

        assert_eq!(category.remaining_amount(), Money::from_dollars(300));
        assert_eq!(category.percentage_used(), Percentage::from_percent(25));
        assert!(!category.is_overspent());
    }

    #[test]
    fn test_percentage_used_without_allocation() {
        let category =
            BudgetCategory::new("Dining Out", Bucket::Want).with_spent(Money::from_dollars(50));

        assert_eq!(category.percentage_used(), Percentage::zero());
        assert!(category.is_overspent());
        assert_eq!(category.remaining_amount(), Money::from_dollars(-50));
    }

    #[test]
    fn test_overspent_percentage_exceeds_hundred() {
        let category = BudgetCategory::new("Fun", Bucket::Want)
            .with_allocated(Money::from_dollars(100))
            .with_spent(Money::from_dollars(150));

        assert_eq!(category.percentage_used(), Percentage::from_percent(150));
    }

    #[test]
    fn test_validation() {
        let mut category = BudgetCategory::new("Valid", Bucket::Save);
        assert!(category.validate().is_ok());

        category.name = "  ".to_string();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));

        category.name = "Valid".to_string();
        category.spent_amount = Money::from_cents(-1);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NegativeSpent)
        );
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!("needs".parse::<Bucket>().unwrap(), Bucket::Need);
        assert_eq!("Want".parse::<Bucket>().unwrap(), Bucket::Want);
        assert_eq!("savings".parse::<Bucket>().unwrap(), Bucket::Save);
        assert!("bills".parse::<Bucket>().is_err());
    }

    #[test]
    fn test_serialization_defaults() {
        let json = r#"{"name":"Rent","bucket":"need"}"#;
        let category: BudgetCategory = serde_json::from_str(json).unwrap();
        assert_eq!(category.bucket, Bucket::Need);
        assert!(category.allocated_amount.is_zero());

        let round: BudgetCategory =
            serde_json::from_str(&serde_json::to_string(&category).unwrap()).unwrap();
        assert_eq!(round, category);
    }
}
