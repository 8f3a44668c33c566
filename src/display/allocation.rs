//! Allocation display formatting

use crate::models::{AllocationRule, Bucket};
use crate::services::{AllocationPlan, AllocationWarning};

/// Format the built-in allocation rules
pub fn format_rule_catalog(rules: &[AllocationRule]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<22}  {:>7}  {:>7}  {:>7}\n",
        "ID", "Name", "Needs", "Wants", "Savings"
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<22}  {:->7}  {:->7}  {:->7}\n",
        "", "", "", "", ""
    ));

    for rule in rules {
        output.push_str(&format!(
            "{:<10}  {:<22}  {:>7}  {:>7}  {:>7}\n",
            rule.kind.id(),
            rule.name,
            rule.bucket_targets.need,
            rule.bucket_targets.want,
            rule.bucket_targets.save
        ));
    }

    output.push_str("\nUse --rule custom --split NEED,WANT,SAVE for your own split.\n");
    output
}

fn format_warning(warning: &AllocationWarning, symbol: &str) -> String {
    match warning {
        AllocationWarning::NonPositiveIncome { income } => format!(
            "Income is {}; nothing was allocated.",
            income.format_with_symbol(symbol)
        ),
        AllocationWarning::CustomTargetsNotHundred { sum } => {
            format!("Custom percentages sum to {}, not 100%; applied as given.", sum)
        }
        AllocationWarning::EmptyBucket { bucket, amount } => format!(
            "{} has no categories; {} left unallocated.",
            bucket.label(),
            amount.format_with_symbol(symbol)
        ),
    }
}

/// Format an allocation plan grouped by bucket
pub fn format_allocation_plan(plan: &AllocationPlan, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Allocation of {} using {}\n",
        plan.income.format_with_symbol(symbol),
        plan.rule.name
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    let name_width = plan
        .categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    for bucket in Bucket::ALL {
        output.push_str(&format!(
            "\n{} ({}): {}\n",
            bucket.label().to_uppercase(),
            plan.rule.target_for(bucket),
            plan.bucket_amounts.get(bucket).format_with_symbol(symbol)
        ));

        let mut categories = plan.categories_in(bucket).peekable();
        if categories.peek().is_none() {
            output.push_str("  (no categories)\n");
            continue;
        }

        for category in categories {
            let spent = if category.spent_amount.is_zero() {
                String::new()
            } else {
                let flag = if category.is_overspent() { " *" } else { "" };
                format!(
                    "  spent {} ({}){}",
                    category.spent_amount.format_with_symbol(symbol),
                    category.percentage_used(),
                    flag
                )
            };

            output.push_str(&format!(
                "  {:<width$}  {:>12}{}\n",
                category.name,
                category.allocated_amount.format_with_symbol(symbol),
                spent,
                width = name_width
            ));
        }
    }

    output.push('\n');
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Allocated:   {}\n",
        plan.allocated_total().format_with_symbol(symbol)
    ));
    if !plan.unallocated.is_zero() {
        output.push_str(&format!(
            "Unallocated: {}\n",
            plan.unallocated.format_with_symbol(symbol)
        ));
    }

    if !plan.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &plan.warnings {
            output.push_str(&format!("  ! {}\n", format_warning(warning, symbol)));
        }
    }

    output
}
