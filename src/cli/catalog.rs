//! Catalog CLI commands: built-in rules, strategies and glide paths

use clap::Args;

use crate::display::{format_glide_path, format_rule_catalog, format_strategy_catalog};
use crate::error::PolicyResult;
use crate::models::{AllocationRule, RebalanceStrategy, RiskTolerance};

/// Arguments for `policy glide-path`
#[derive(Args, Debug)]
pub struct GlidePathArgs {
    /// Current age
    #[arg(short, long)]
    pub age: u32,

    /// Retirement age
    #[arg(short, long, default_value_t = 65)]
    pub retirement_age: u32,

    /// Show a single allocation for this risk tolerance instead of the path
    /// (conservative, moderately_conservative, moderate, moderately_aggressive,
    /// aggressive, very_aggressive)
    #[arg(long)]
    pub risk: Option<String>,
}

/// Handle `policy rules`
pub fn handle_rules_command() -> PolicyResult<()> {
    print!("{}", format_rule_catalog(&AllocationRule::catalog()));
    Ok(())
}

/// Handle `policy strategies`
pub fn handle_strategies_command() -> PolicyResult<()> {
    print!("{}", format_strategy_catalog(&RebalanceStrategy::catalog()));
    Ok(())
}

/// Handle `policy glide-path`
pub fn handle_glide_path_command(args: GlidePathArgs) -> PolicyResult<()> {
    match args.risk.as_deref() {
        Some(risk) => {
            let tolerance: RiskTolerance = risk.parse()?;
            let strategy = RebalanceStrategy::age_based(args.age, tolerance);
            print!("{}", format_strategy_catalog(std::slice::from_ref(&strategy)));
        }
        None => {
            let path = RebalanceStrategy::glide_path(args.age, args.retirement_age)?;
            println!(
                "Glide path from age {} to {}\n",
                args.age, args.retirement_age
            );
            print!("{}", format_glide_path(&path));
        }
    }
    Ok(())
}
