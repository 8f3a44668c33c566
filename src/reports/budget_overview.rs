//! Budget Overview Report
//!
//! Rolls an allocation plan up by bucket: target share, allocated, spent and
//! remaining amounts, plus the money left unallocated by empty buckets.

use serde::Serialize;
use std::io::Write;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{Bucket, Money, Percentage};
use crate::services::AllocationPlan;

/// One bucket's totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketReportRow {
    pub bucket: Bucket,
    /// The rule's target for this bucket
    pub target: Percentage,
    /// Amount the rule assigned to the bucket
    pub bucket_amount: Money,
    /// Amount actually handed to the bucket's categories
    pub allocated: Money,
    pub spent: Money,
    pub remaining: Money,
    pub category_count: usize,
    pub overspent_count: usize,
}

impl BucketReportRow {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Spent as a share of the allocated amount
    pub fn percentage_used(&self) -> Percentage {
        Percentage::weight_of(self.spent, self.allocated)
    }
}

/// Budget Overview Report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketOverviewReport {
    pub rule_name: String,
    pub income: Money,
    pub buckets: Vec<BucketReportRow>,
    pub total_allocated: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    pub unallocated: Money,
}

impl BucketOverviewReport {
    /// Generate the overview for a computed plan
    pub fn generate(plan: &AllocationPlan) -> Self {
        let buckets: Vec<BucketReportRow> = Bucket::ALL
            .iter()
            .map(|bucket| {
                let mut row = BucketReportRow {
                    bucket: *bucket,
                    target: plan.rule.target_for(*bucket),
                    bucket_amount: plan.bucket_amounts.get(*bucket),
                    allocated: Money::zero(),
                    spent: Money::zero(),
                    remaining: Money::zero(),
                    category_count: 0,
                    overspent_count: 0,
                };

                for category in plan.categories_in(*bucket) {
                    row.allocated += category.allocated_amount;
                    row.spent += category.spent_amount;
                    row.remaining += category.remaining_amount();
                    row.category_count += 1;
                    if category.is_overspent() {
                        row.overspent_count += 1;
                    }
                }
                row
            })
            .collect();

        Self {
            rule_name: plan.rule.name.clone(),
            income: plan.income,
            total_allocated: buckets.iter().map(|b| b.allocated).sum(),
            total_spent: buckets.iter().map(|b| b.spent).sum(),
            total_remaining: buckets.iter().map(|b| b.remaining).sum(),
            unallocated: plan.unallocated,
            buckets,
        }
    }

    /// Get count of overspent categories
    pub fn overspent_count(&self) -> usize {
        self.buckets.iter().map(|b| b.overspent_count).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Bucket Overview - {}\n", self.rule_name));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!("Income: {}\n\n", self.income));

        output.push_str(&format!(
            "{:<10} {:>8} {:>12} {:>12} {:>12} {:>12} {:>6}\n",
            "Bucket", "Target", "Bucket", "Allocated", "Spent", "Remaining", "Cats"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.buckets {
            let remaining_display = if row.is_overspent() {
                format!("{} *", row.remaining)
            } else {
                row.remaining.to_string()
            };

            output.push_str(&format!(
                "{:<10} {:>8} {:>12} {:>12} {:>12} {:>12} {:>6}\n",
                row.bucket.label(),
                row.target,
                row.bucket_amount,
                row.allocated,
                row.spent,
                remaining_display,
                row.category_count
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
            "TOTAL", "", "", self.total_allocated, self.total_spent, self.total_remaining
        ));

        if !self.unallocated.is_zero() {
            output.push_str(&format!("\nUnallocated (no categories): {}\n", self.unallocated));
        }
        if self.overspent_count() > 0 {
            output.push_str("\n* = Overspent\n");
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> PolicyResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "Bucket",
            "Target %",
            "Bucket Amount",
            "Allocated",
            "Spent",
            "Remaining",
            "Categories",
        ])?;

        for row in &self.buckets {
            csv_writer.write_record([
                row.bucket.to_string(),
                format!("{:.2}", row.target.as_f64()),
                format!("{:.2}", row.bucket_amount.as_f64()),
                format!("{:.2}", row.allocated.as_f64()),
                format!("{:.2}", row.spent.as_f64()),
                format!("{:.2}", row.remaining.as_f64()),
                row.category_count.to_string(),
            ])?;
        }

        csv_writer.write_record([
            "TOTAL".to_string(),
            String::new(),
            format!("{:.2}", self.income.as_f64()),
            format!("{:.2}", self.total_allocated.as_f64()),
            format!("{:.2}", self.total_spent.as_f64()),
            format!("{:.2}", self.total_remaining.as_f64()),
            String::new(),
        ])?;

        csv_writer
            .flush()
            .map_err(|e| PolicyError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationRule, AllocationRuleKind, BudgetCategory};
    use crate::services::AllocationDistributor;

    fn sample_plan() -> AllocationPlan {
        let rule = AllocationRule::builtin(AllocationRuleKind::SeventyFifteenTen);
        let categories = vec![
            BudgetCategory::new("Rent", Bucket::Need).with_spent(Money::from_dollars(1_900)),
            BudgetCategory::new("Groceries", Bucket::Need).with_spent(Money::from_dollars(400)),
            BudgetCategory::new("Dining", Bucket::Want).with_spent(Money::from_dollars(100)),
        ];
        AllocationDistributor::new(&rule).plan(Money::from_dollars(5_000), &categories)
    }

    #[test]
    fn test_generate_report() {
        let report = BucketOverviewReport::generate(&sample_plan());

        assert_eq!(report.buckets.len(), 3);
        let need = &report.buckets[0];
        assert_eq!(need.bucket, Bucket::Need);
        assert_eq!(need.allocated, Money::from_dollars(3_750));
        assert_eq!(need.spent, Money::from_dollars(2_300));
        assert_eq!(need.category_count, 2);
        assert_eq!(need.overspent_count, 1);

        let save = &report.buckets[2];
        assert_eq!(save.category_count, 0);
        assert_eq!(save.bucket_amount, Money::from_dollars(500));
        assert!(save.allocated.is_zero());

        assert_eq!(report.total_allocated, Money::from_dollars(4_500));
        assert_eq!(report.unallocated, Money::from_dollars(500));
        assert_eq!(report.overspent_count(), 1);
    }

    #[test]
    fn test_terminal_format() {
        let output = BucketOverviewReport::generate(&sample_plan()).format_terminal();

        assert!(output.contains("Bucket Overview"));
        assert!(output.contains("Needs"));
        assert!(output.contains("Unallocated (no categories): $500.00"));
        assert!(output.contains("* = Overspent"));
    }

    #[test]
    fn test_csv_export() {
        let report = BucketOverviewReport::generate(&sample_plan());

        let mut csv_output = Vec::new();
        report.export_csv(&mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.starts_with("Bucket,Target %,Bucket Amount,Allocated,Spent,Remaining,Categories"));
        assert!(csv_string.contains("Needs,75.00,3750.00,3750.00,2300.00,1450.00,2"));
        assert!(csv_string.contains("TOTAL,,5000.00,4500.00,2400.00,2100.00,"));
    }
}
