//! Command-line interface.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "atom-governance")]
#[command(about = "ATOM Governance - maturity-gated agent authorization", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .atom/config.yaml + .atom/local.yaml)
    #[arg(short, long, global = true, env = "ATOM_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .atom/config.yaml
    Init(commands::init::InitArgs),
    /// Authorize a single request
    Check(commands::check::CheckArgs),
    /// Run a synthetic workload and report cache statistics
    Simulate(commands::simulate::SimulateArgs),
    /// Configuration commands
    Config(commands::config::ConfigArgs),
    /// Policy commands
    Policy(commands::policy::PolicyArgs),
}

/// Load configuration from an explicit file or the project hierarchy.
pub fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Report a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from([
            "atom-governance",
            "--json",
            "check",
            "--agent",
            "a1",
            "--action",
            "delete",
            "--maturity",
            "intern",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.agent, "a1");
                assert_eq!(args.action, "delete");
                assert_eq!(args.maturity, "intern");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_simulate_defaults() {
        let cli = Cli::parse_from(["atom-governance", "simulate"]);
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.agents, 8);
                assert_eq!(args.rounds, 25);
                assert_eq!(args.maturity, "supervised");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
