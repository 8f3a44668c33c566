//! Rebalance display formatting

use crate::models::{RebalanceStrategy, TradeAction};
use crate::services::RebalanceAnalysis;

fn format_targets(strategy: &RebalanceStrategy) -> String {
    strategy
        .target_weights
        .iter()
        .map(|(class, weight)| format!("{} {}", class, weight))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format the built-in strategies with their target weights
pub fn format_strategy_catalog(strategies: &[RebalanceStrategy]) -> String {
    let mut output = String::new();

    for strategy in strategies {
        output.push_str(&format!("{} ({})\n", strategy.name, strategy.id));
        if !strategy.description.is_empty() {
            output.push_str(&format!("  {}\n", strategy.description));
        }
        if let Some(risk) = strategy.risk_tolerance {
            output.push_str(&format!("  Risk: {}\n", risk));
        }
        output.push_str(&format!("  Rebalance: {}\n", strategy.rebalancing_frequency));
        output.push_str(&format!("  Targets: {}\n\n", format_targets(strategy)));
    }

    output
}

/// Format a glide path, one age-based strategy per row
pub fn format_glide_path(path: &[(u32, RebalanceStrategy)]) -> String {
    if path.is_empty() {
        return "No glide path steps.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:>4}  {}\n", "Age", "Targets"));
    output.push_str(&format!("{:->4}  {:-<50}\n", "", ""));

    for (age, strategy) in path {
        output.push_str(&format!("{:>4}  {}\n", age, format_targets(strategy)));
    }

    output
}

/// Format the deviations, recommendations and impact of an analysis
pub fn format_rebalance_analysis(analysis: &RebalanceAnalysis, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Rebalance against {} (threshold {})\n",
        analysis.strategy.name, analysis.threshold
    ));
    output.push_str(&"=".repeat(78));
    output.push('\n');
    output.push_str(&format!(
        "Portfolio value: {}\n\n",
        analysis.total_value.format_with_symbol(symbol)
    ));

    output.push_str(&format!(
        "{:<14} {:>10} {:>10} {:>10} {:>14}\n",
        "Asset Class", "Current", "Target", "Drift", "Value"
    ));
    output.push_str(&"-".repeat(78));
    output.push('\n');

    for deviation in &analysis.deviations {
        let marker = if deviation.out_of_range { " *" } else { "" };
        output.push_str(&format!(
            "{:<14} {:>10} {:>10} {:>10} {:>14}{}\n",
            deviation.asset_class.name(),
            deviation.current_weight,
            deviation.target_weight,
            deviation.drift(),
            deviation.current_value.format_with_symbol(symbol),
            marker
        ));
    }

    if analysis.is_balanced() {
        output.push_str("\nPortfolio is within threshold. No trades recommended.\n");
        return output;
    }

    output.push_str("\n* = outside threshold\n\nRecommendations:\n");
    for rec in &analysis.recommendations {
        let verb = match rec.action {
            TradeAction::Buy => "BUY ",
            TradeAction::Sell => "SELL",
            TradeAction::Hold => "HOLD",
        };
        output.push_str(&format!(
            "  [{:<6}] {} {:>14}  {}\n",
            rec.priority,
            verb,
            rec.action_amount.format_with_symbol(symbol),
            rec.reason
        ));
    }

    let impact = &analysis.impact;
    output.push_str("\nEstimated impact:\n");
    output.push_str(&format!(
        "  Traded volume:  {} (buy {}, sell {})\n",
        impact.total_transaction_amount.format_with_symbol(symbol),
        impact.buy_amount.format_with_symbol(symbol),
        impact.sell_amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Fees:           {}\n",
        impact.estimated_fees.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Tax impact:     {}\n",
        impact.estimated_tax_impact.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Net cost:       {}\n",
        impact.net_cost.format_with_symbol(symbol)
    ));
    if !impact.projected_return_delta.is_zero() || !impact.projected_risk_delta.is_zero() {
        output.push_str(&format!(
            "  Projected:      return {}, risk {}\n",
            impact.projected_return_delta, impact.projected_risk_delta
        ));
    }

    output
}
