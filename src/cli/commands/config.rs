//! `atom-governance config`: inspect the effective configuration.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration (defaults, files, ATOM_* env)
    Show,
}

#[derive(Debug, serde::Serialize)]
pub struct ConfigOutput {
    #[serde(flatten)]
    pub config: Config,
    #[serde(skip)]
    pub yaml: String,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        self.yaml.clone()
    }
}

pub fn execute(args: ConfigArgs, config: &Config, json_mode: bool) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let yaml = serde_yaml::to_string(config).context("Failed to render configuration")?;
            let out = ConfigOutput {
                config: config.clone(),
                yaml,
            };
            output(&out, json_mode);
        }
    }
    Ok(())
}
