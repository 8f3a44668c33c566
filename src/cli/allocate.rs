//! Allocate CLI command
//!
//! Splits an income across buckets and categories. Inputs come from a
//! scenario file, from flags, or both; flags win.

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::OutputArgs;
use crate::config::Settings;
use crate::display::format_allocation_plan;
use crate::error::{PolicyError, PolicyResult};
use crate::export::write_allocation;
use crate::models::{AllocationRuleKind, Bucket, BudgetCategory, CustomPercentages, Money, RuleSelection};
use crate::reports::BucketOverviewReport;
use crate::scenario::BudgetScenario;
use crate::services::AllocationDistributor;

/// Arguments for `policy allocate`
#[derive(Args, Debug)]
pub struct AllocateArgs {
    /// Budget scenario file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Income to allocate (e.g., "5000" or "$5,000.00")
    #[arg(short, long)]
    pub income: Option<String>,

    /// Allocation rule: 75_15_10, 50_30_20, 80_20 or custom
    #[arg(short, long)]
    pub rule: Option<String>,

    /// Custom split as NEED,WANT,SAVE (e.g., "60,25,15")
    #[arg(long)]
    pub split: Option<String>,

    /// Category as NAME:BUCKET, repeatable (e.g., "Rent:need")
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,

    /// Show the per-bucket overview instead of the category list
    #[arg(long)]
    pub overview: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Parse a "NAME:BUCKET" flag value
fn parse_category_flag(value: &str) -> PolicyResult<BudgetCategory> {
    let (name, bucket) = value.rsplit_once(':').ok_or_else(|| {
        PolicyError::Validation(format!("Category '{}' must look like NAME:BUCKET", value))
    })?;

    let bucket: Bucket = bucket
        .parse()
        .map_err(|e| PolicyError::Validation(format!("Category '{}': {}", value, e)))?;
    let category = BudgetCategory::new(name.trim(), bucket);
    category
        .validate()
        .map_err(|e| PolicyError::Validation(format!("Category '{}': {}", value, e)))?;

    Ok(category)
}

fn resolve_rule(
    args: &AllocateArgs,
    scenario: Option<&BudgetScenario>,
    settings: &Settings,
) -> PolicyResult<RuleSelection> {
    let flag_kind = args
        .rule
        .as_deref()
        .map(str::parse::<AllocationRuleKind>)
        .transpose()?;
    let flag_split = args.split.as_deref().map(CustomPercentages::parse).transpose()?;

    match (flag_kind, flag_split) {
        (Some(AllocationRuleKind::Custom) | None, Some(split)) => Ok(RuleSelection::Custom(split)),
        (Some(kind), Some(_)) => Err(PolicyError::Validation(format!(
            "--split only applies to the custom rule, not '{}'",
            kind.id()
        ))),
        (Some(kind), None) => Ok(RuleSelection::Named(kind)),
        (None, None) => match scenario {
            Some(scenario) => scenario.rule_selection(settings.default_rule),
            None => Ok(RuleSelection::Named(settings.default_rule)),
        },
    }
}

/// Handle `policy allocate`
pub fn handle_allocate_command(settings: &Settings, args: AllocateArgs) -> PolicyResult<()> {
    let scenario = args.scenario.as_ref().map(BudgetScenario::load).transpose()?;

    let income = match (&args.income, &scenario) {
        (Some(income), _) => Money::parse(income)
            .map_err(|e| PolicyError::Validation(format!("Invalid income: {}", e)))?,
        (None, Some(scenario)) => scenario.income()?,
        (None, None) => {
            return Err(PolicyError::Validation(
                "Provide an income with --income or a --scenario file".into(),
            ))
        }
    };

    let rule = resolve_rule(&args, scenario.as_ref(), settings)?.resolve()?;

    let mut categories = match &scenario {
        Some(scenario) => scenario.categories()?,
        None => Vec::new(),
    };
    for flag in &args.categories {
        categories.push(parse_category_flag(flag)?);
    }

    info!(income = %income, rule = %rule.name, categories = categories.len(), "allocating");
    let plan = AllocationDistributor::new(&rule).plan(income, &categories);

    match args.output.format {
        Some(format) => args
            .output
            .write_with(format, |writer| write_allocation(&plan, format, writer)),
        None if args.overview => {
            print!("{}", BucketOverviewReport::generate(&plan).format_terminal());
            Ok(())
        }
        None => {
            print!("{}", format_allocation_plan(&plan, &settings.currency_symbol));
            Ok(())
        }
    }
}
