//! Config CLI commands

use clap::Subcommand;

use crate::config::{PolicyPaths, Settings};
use crate::error::PolicyResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the config location and the effective settings
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &PolicyPaths,
    settings: &Settings,
    cmd: ConfigCommands,
) -> PolicyResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Budget Policy Configuration");
            println!("===========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!(
                "Settings file:    {}{}",
                paths.settings_file().display(),
                if paths.is_initialized() { "" } else { " (not created, using defaults)" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Default rule:        {}", settings.default_rule.id());
            println!("  Default strategy:    {}", settings.default_strategy.id());
            println!("  Rebalance threshold: {}%", settings.rebalance_threshold);
            println!("  Consider taxes:      {}", settings.consider_taxes);
            println!("  Consider fees:       {}", settings.consider_fees);
            println!("  Fee rate:            {}", settings.cost_assumptions.fee_rate);
            println!("  Tax rate:            {}", settings.cost_assumptions.tax_rate);
        }
        ConfigCommands::Init { force } => {
            if paths.is_initialized() && !force {
                println!(
                    "Config already exists at: {}",
                    paths.settings_file().display()
                );
                println!("Use --force to overwrite it with defaults.");
                return Ok(());
            }

            Settings::default().save(paths)?;
            println!("Wrote default config to: {}", paths.settings_file().display());
        }
    }

    Ok(())
}
