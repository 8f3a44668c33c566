//! Income allocation across buckets and categories
//!
//! Splits an income figure by an [`AllocationRule`] into bucket amounts, then
//! spreads each bucket evenly over the categories tagged with it. Buckets
//! without categories keep their share undistributed; the plan reports it as
//! unallocated instead of rolling it into another bucket.

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::percentage::{saturate_i64, BPS_SCALE};
use crate::models::{AllocationRule, Bucket, BudgetCategory, Money, Percentage};

/// Amount assigned to each bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BucketAmounts {
    pub need: Money,
    pub want: Money,
    pub save: Money,
}

impl BucketAmounts {
    pub fn get(&self, bucket: Bucket) -> Money {
        match bucket {
            Bucket::Need => self.need,
            Bucket::Want => self.want,
            Bucket::Save => self.save,
        }
    }

    fn slot(&mut self, bucket: Bucket) -> &mut Money {
        match bucket {
            Bucket::Need => &mut self.need,
            Bucket::Want => &mut self.want,
            Bucket::Save => &mut self.save,
        }
    }

    pub fn total(&self) -> Money {
        self.need + self.want + self.save
    }
}

/// Something the caller may want to surface to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationWarning {
    /// Income was zero or negative, so nothing was allocated
    NonPositiveIncome { income: Money },
    /// Custom targets were applied as given although they do not sum to 100%
    CustomTargetsNotHundred { sum: Percentage },
    /// A bucket had money but no categories to receive it
    EmptyBucket { bucket: Bucket, amount: Money },
}

/// Result of applying a rule to an income and a category list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationPlan {
    pub rule: AllocationRule,
    pub income: Money,
    pub bucket_amounts: BucketAmounts,
    /// Categories in caller order with `allocated_amount` set
    pub categories: Vec<BudgetCategory>,
    /// Bucket money that no category received
    pub unallocated: Money,
    pub warnings: Vec<AllocationWarning>,
}

impl AllocationPlan {
    /// Sum of the per-category allocations
    pub fn allocated_total(&self) -> Money {
        self.categories.iter().map(|c| c.allocated_amount).sum()
    }

    pub fn categories_in(&self, bucket: Bucket) -> impl Iterator<Item = &BudgetCategory> {
        self.categories.iter().filter(move |c| c.bucket == bucket)
    }
}

/// Distributes income according to one allocation rule
pub struct AllocationDistributor<'a> {
    rule: &'a AllocationRule,
}

impl<'a> AllocationDistributor<'a> {
    pub fn new(rule: &'a AllocationRule) -> Self {
        Self { rule }
    }

    /// Compute the amount for each bucket.
    ///
    /// Each bucket gets the floor of its share; leftover cents (up to the
    /// rounded total share) go to the buckets with the largest remainders,
    /// ties resolved in need/want/save order. For a rule summing to 100% the
    /// bucket amounts add up to `income` exactly.
    pub fn bucket_amounts(&self, income: Money) -> BucketAmounts {
        let mut amounts = BucketAmounts::default();
        if !income.is_positive() {
            return amounts;
        }

        let scale = BPS_SCALE as i128;
        let cents = income.cents() as i128;

        let mut remainders: Vec<(Bucket, i128)> = Vec::with_capacity(Bucket::ALL.len());
        let mut floored_total: i128 = 0;
        for bucket in Bucket::ALL {
            let bps = self.rule.target_for(bucket).bps().max(0) as i128;
            let share = cents * bps;
            let floor = share / scale;
            *amounts.slot(bucket) = Money::from_cents(saturate_i64(floor));
            floored_total += floor;
            remainders.push((bucket, share % scale));
        }

        let total_bps: i128 = Bucket::ALL
            .iter()
            .map(|b| self.rule.target_for(*b).bps().max(0) as i128)
            .sum();
        let target_total = (cents * total_bps + scale / 2) / scale;
        let mut leftover = target_total - floored_total;

        // stable sort keeps need/want/save order among equal remainders
        remainders.sort_by(|a, b| b.1.cmp(&a.1));
        for (bucket, remainder) in remainders {
            if leftover <= 0 || remainder == 0 {
                break;
            }
            let slot = amounts.slot(bucket);
            *slot = Money::from_cents(slot.cents().saturating_add(1));
            leftover -= 1;
        }

        amounts
    }

    /// Return copies of `categories` with `allocated_amount` set.
    ///
    /// Input order, ids, names, buckets and spent amounts are preserved.
    pub fn distribute(&self, income: Money, categories: &[BudgetCategory]) -> Vec<BudgetCategory> {
        self.plan(income, categories).categories
    }

    /// Full allocation with bucket totals, unallocated money and warnings
    pub fn plan(&self, income: Money, categories: &[BudgetCategory]) -> AllocationPlan {
        let mut warnings = Vec::new();
        let mut allocated: Vec<BudgetCategory> = categories
            .iter()
            .cloned()
            .map(|c| c.with_allocated(Money::zero()))
            .collect();

        if !income.is_positive() {
            debug!(income = %income, "non-positive income, allocating nothing");
            warnings.push(AllocationWarning::NonPositiveIncome { income });
            return AllocationPlan {
                rule: self.rule.clone(),
                income,
                bucket_amounts: BucketAmounts::default(),
                categories: allocated,
                unallocated: Money::zero(),
                warnings,
            };
        }

        if !self.rule.is_balanced() {
            let sum = self.rule.target_sum();
            warn!(rule = %self.rule.name, sum = %sum, "bucket targets do not sum to 100%");
            warnings.push(AllocationWarning::CustomTargetsNotHundred { sum });
        }

        let bucket_amounts = self.bucket_amounts(income);
        let mut unallocated = Money::zero();

        for bucket in Bucket::ALL {
            let amount = bucket_amounts.get(bucket);
            let members: Vec<usize> = allocated
                .iter()
                .enumerate()
                .filter(|(_, c)| c.bucket == bucket)
                .map(|(i, _)| i)
                .collect();

            if members.is_empty() {
                if !amount.is_zero() {
                    warn!(bucket = %bucket, amount = %amount, "no categories in bucket, amount left unallocated");
                    warnings.push(AllocationWarning::EmptyBucket { bucket, amount });
                }
                unallocated += amount;
                continue;
            }

            debug!(
                bucket = %bucket,
                amount = %amount,
                categories = members.len(),
                "splitting bucket"
            );
            for (index, share) in members.iter().zip(amount.split_evenly(members.len())) {
                allocated[*index].allocated_amount = share;
            }
        }

        AllocationPlan {
            rule: self.rule.clone(),
            income,
            bucket_amounts,
            categories: allocated,
            unallocated,
            warnings,
        }
    }
}

/// Allocate `income` over `categories` using `rule`
pub fn distribute(
    income: Money,
    rule: &AllocationRule,
    categories: &[BudgetCategory],
) -> Vec<BudgetCategory> {
    AllocationDistributor::new(rule).distribute(income, categories)
}
