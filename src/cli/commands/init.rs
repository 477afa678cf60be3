//! Implementation of the `atom-governance init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::setup::init_project;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_path: Option<PathBuf>,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        match &self.config_path {
            Some(path) => format!("{}\n\nConfiguration written to {}", self.message, path.display()),
            None => self.message.clone(),
        }
    }
}

pub fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    if target_path.join(".atom/config.yaml").exists() && !args.force {
        let out = InitOutput {
            success: false,
            message: "Project already initialized. Use --force to reinitialize.".to_string(),
            config_path: None,
        };
        output(&out, json_mode);
        return Ok(());
    }

    let config_path = init_project(&target_path, args.force)?;
    let out = InitOutput {
        success: true,
        message: "Initialized ATOM governance configuration.".to_string(),
        config_path: Some(config_path),
    };
    output(&out, json_mode);
    Ok(())
}
