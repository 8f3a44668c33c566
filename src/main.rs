use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_policy::cli::{
    handle_allocate_command, handle_config_command, handle_glide_path_command,
    handle_rebalance_command, handle_rules_command, handle_strategies_command, AllocateArgs,
    ConfigCommands, GlidePathArgs, RebalanceArgs,
};
use budget_policy::config::{PolicyPaths, Settings};
use budget_policy::log::init_logging;

#[derive(Parser)]
#[command(
    name = "policy",
    version,
    about = "Budget allocation and portfolio rebalancing policy engine",
    long_about = "Splits income across needs, wants and savings using a named \
                  allocation rule, and checks a portfolio against a target \
                  strategy to recommend rebalancing trades with estimated costs."
)]
struct Cli {
    /// Print debug logging to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in allocation rules
    Rules,

    /// List the built-in rebalance strategies
    Strategies,

    /// Allocate an income across buckets and categories
    Allocate(AllocateArgs),

    /// Recommend trades to bring a portfolio back to its targets
    Rebalance(RebalanceArgs),

    /// Show age-based allocations from now until retirement
    GlidePath(GlidePathArgs),

    /// Show or initialize configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = PolicyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Rules) => handle_rules_command()?,
        Some(Commands::Strategies) => handle_strategies_command()?,
        Some(Commands::Allocate(args)) => handle_allocate_command(&settings, args)?,
        Some(Commands::Rebalance(args)) => handle_rebalance_command(&settings, args)?,
        Some(Commands::GlidePath(args)) => handle_glide_path_command(args)?,
        Some(Commands::Config(cmd)) => handle_config_command(&paths, &settings, cmd)?,
        None => {
            println!("policy - budget allocation and rebalancing");
            println!();
            println!("Run 'policy --help' for usage information.");
            println!("Run 'policy rules' or 'policy strategies' to see what is built in.");
        }
    }

    Ok(())
}
