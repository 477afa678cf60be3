//! ATOM governance CLI entry point.

use anyhow::Result;
use clap::Parser;

use atom_governance::cli::commands::{check, config as config_cmd, init, policy, simulate};
use atom_governance::cli::{handle_error, load_config, Cli, Commands};
use atom_governance::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let json_mode = cli.json;

    if let Commands::Init(args) = cli.command {
        return init::execute(args, json_mode);
    }

    let config = load_config(cli.config.as_ref())?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Check(args) => check::execute(args, &config, json_mode).await,
        Commands::Simulate(args) => simulate::execute(args, &config, json_mode).await,
        Commands::Config(args) => config_cmd::execute(args, &config, json_mode),
        Commands::Policy(args) => policy::execute(args, &config, json_mode),
    }
}
