//! Rebalance CLI command
//!
//! Compares holdings against a strategy and prints or exports the
//! recommended trades with their estimated cost.

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::OutputArgs;
use crate::config::Settings;
use crate::display::format_rebalance_analysis;
use crate::error::{PolicyError, PolicyResult};
use crate::export::write_rebalance;
use crate::models::{
    AssetClass, Holding, Money, Portfolio, RebalanceStrategy, RebalanceStrategyKind,
    RebalanceThreshold,
};
use crate::scenario::PortfolioScenario;
use crate::services::{RebalanceConfig, RebalanceService};

/// Arguments for `policy rebalance`
#[derive(Args, Debug)]
pub struct RebalanceArgs {
    /// Portfolio scenario file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Holding as CLASS=VALUE, repeatable (e.g., "stocks=70000")
    #[arg(long = "holding")]
    pub holdings: Vec<String>,

    /// Strategy id (see `policy strategies`)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Rebalance threshold in whole percent (1-15)
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Leave taxes out of the impact estimate
    #[arg(long)]
    pub no_taxes: bool,

    /// Leave fees out of the impact estimate
    #[arg(long)]
    pub no_fees: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Parse a "CLASS=VALUE" flag value
fn parse_holding_flag(value: &str) -> PolicyResult<Holding> {
    let (class, amount) = value.split_once('=').ok_or_else(|| {
        PolicyError::Validation(format!("Holding '{}' must look like CLASS=VALUE", value))
    })?;

    let asset_class: AssetClass = class.parse()?;
    let amount = Money::parse(amount)
        .map_err(|e| PolicyError::Validation(format!("Holding '{}': {}", value, e)))?;

    Ok(Holding::new(asset_class, amount))
}

fn build_portfolio(
    args: &RebalanceArgs,
    scenario: Option<&PortfolioScenario>,
) -> PolicyResult<Portfolio> {
    if !args.holdings.is_empty() {
        let holdings = args
            .holdings
            .iter()
            .map(|h| parse_holding_flag(h))
            .collect::<PolicyResult<Vec<_>>>()?;
        return Portfolio::from_holdings(holdings);
    }

    match scenario {
        Some(scenario) => scenario.portfolio(),
        None => Err(PolicyError::Validation(
            "Provide holdings with --holding or a --scenario file".into(),
        )),
    }
}

fn build_strategy(
    args: &RebalanceArgs,
    scenario: Option<&PortfolioScenario>,
    settings: &Settings,
) -> PolicyResult<RebalanceStrategy> {
    if let Some(id) = &args.strategy {
        let kind: RebalanceStrategyKind = id.parse()?;
        return Ok(RebalanceStrategy::builtin(kind));
    }

    match scenario {
        Some(scenario) => scenario.strategy(settings.default_strategy),
        None => Ok(RebalanceStrategy::builtin(settings.default_strategy)),
    }
}

/// Settings, then scenario, then flags
fn build_config(
    args: &RebalanceArgs,
    scenario: Option<&PortfolioScenario>,
    settings: &Settings,
) -> PolicyResult<RebalanceConfig> {
    let mut config = settings.rebalance_config()?;
    if let Some(scenario) = scenario {
        config = scenario.rebalance_config(config)?;
    }

    if let Some(pct) = args.threshold {
        config.threshold = RebalanceThreshold::new(pct)?;
    }
    if args.no_taxes {
        config.consider_taxes = false;
    }
    if args.no_fees {
        config.consider_fees = false;
    }

    Ok(config)
}

/// Handle `policy rebalance`
pub fn handle_rebalance_command(settings: &Settings, args: RebalanceArgs) -> PolicyResult<()> {
    let scenario = args
        .scenario
        .as_ref()
        .map(PortfolioScenario::load)
        .transpose()?;

    let portfolio = build_portfolio(&args, scenario.as_ref())?;
    let strategy = build_strategy(&args, scenario.as_ref(), settings)?;
    let config = build_config(&args, scenario.as_ref(), settings)?;

    if portfolio.is_empty() || portfolio.total_value().is_zero() {
        return Err(PolicyError::Validation(
            "Portfolio has no value to rebalance".into(),
        ));
    }

    info!(
        strategy = %strategy.id,
        total = %portfolio.total_value(),
        threshold = %config.threshold,
        "rebalancing"
    );
    let analysis = RebalanceService::new(config).analyze(&portfolio, &strategy);

    match args.output.format {
        Some(format) => args
            .output
            .write_with(format, |writer| write_rebalance(&analysis, format, writer)),
        None => {
            print!(
                "{}",
                format_rebalance_analysis(&analysis, &settings.currency_symbol)
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RebalanceArgs {
        RebalanceArgs {
            scenario: None,
            holdings: vec!["stocks=70000".into(), "bonds=30000".into()],
            strategy: None,
            threshold: None,
            no_taxes: false,
            no_fees: false,
            output: OutputArgs::default(),
        }
    }

    #[test]
    fn test_parse_holding_flag() {
        let holding = parse_holding_flag("real-estate=$8,000").unwrap();
        assert_eq!(holding.asset_class, AssetClass::RealEstate);
        assert_eq!(holding.current_value, Money::from_dollars(8_000));

        assert!(parse_holding_flag("stocks").is_err());
        assert!(parse_holding_flag("gold=100").unwrap_err().is_not_found());
        assert!(parse_holding_flag("stocks=lots").unwrap_err().is_validation());
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            rebalance_threshold: 8,
            ..Settings::default()
        };

        let config = build_config(&args(), None, &settings).unwrap();
        assert_eq!(config.threshold.percent(), 8);
        assert!(config.consider_taxes);

        let mut flagged = args();
        flagged.threshold = Some(3);
        flagged.no_taxes = true;
        let config = build_config(&flagged, None, &settings).unwrap();
        assert_eq!(config.threshold.percent(), 3);
        assert!(!config.consider_taxes);
        assert!(config.consider_fees);

        flagged.threshold = Some(0);
        assert!(build_config(&flagged, None, &settings).is_err());
    }

    #[test]
    fn test_strategy_resolution() {
        let settings = Settings::default();
        assert_eq!(build_strategy(&args(), None, &settings).unwrap().id, "moderate");

        let mut named = args();
        named.strategy = Some("three_fund".into());
        assert_eq!(build_strategy(&named, None, &settings).unwrap().id, "three_fund");

        named.strategy = Some("yolo".into());
        assert!(build_strategy(&named, None, &settings).unwrap_err().is_not_found());
    }

    #[test]
    fn test_portfolio_requires_input() {
        let mut empty = args();
        empty.holdings.clear();
        assert!(build_portfolio(&empty, None).unwrap_err().is_validation());

        let portfolio = build_portfolio(&args(), None).unwrap();
        assert_eq!(portfolio.total_value(), Money::from_dollars(100_000));
    }
}
