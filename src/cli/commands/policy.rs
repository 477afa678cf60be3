//! `atom-governance policy`: inspect maturity rules.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{ActionRule, AgentMaturity, Config};
use crate::services::MaturityPolicyEvaluator;

#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: PolicyCommands,
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// List the minimum maturity per action type
    List,
}

#[derive(Debug, serde::Serialize)]
pub struct PolicyListOutput {
    pub rules: Vec<ActionRule>,
    pub default_min_maturity: AgentMaturity,
}

impl CommandOutput for PolicyListOutput {
    fn to_human(&self) -> String {
        TableFormatter::new().format_rules(&self.rules, self.default_min_maturity)
    }
}

pub fn execute(args: PolicyArgs, config: &Config, json_mode: bool) -> Result<()> {
    match args.command {
        PolicyCommands::List => {
            let evaluator = MaturityPolicyEvaluator::from_config(&config.policy)
                .context("invalid policy configuration")?;
            let out = PolicyListOutput {
                rules: evaluator.rules(),
                default_min_maturity: evaluator.default_min_maturity(),
            };
            output(&out, json_mode);
        }
    }
    Ok(())
}
