//! `atom-governance check`: authorize one request against the configured policy.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{AgentMaturity, AuthorizationRequest, Config};
use crate::infrastructure::setup::build_runtime;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Agent identifier
    #[arg(short, long)]
    pub agent: String,

    /// Action type (e.g. stream_chat, canvas_execute_javascript)
    #[arg(long)]
    pub action: String,

    /// Agent maturity (student, intern, supervised, autonomous)
    #[arg(short, long)]
    pub maturity: String,

    /// Request metadata as a JSON object
    #[arg(long)]
    pub metadata: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct CheckOutput {
    pub agent_id: String,
    pub action_type: String,
    pub maturity: AgentMaturity,
    pub required: AgentMaturity,
    pub allowed: bool,
    pub source: String,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let verdict = if self.allowed { "ALLOWED" } else { "DENIED" };
        format!(
            "{verdict}: agent '{}' ({}) -> '{}' (requires {}, decided by {})",
            self.agent_id, self.maturity, self.action_type, self.required, self.source
        )
    }
}

pub async fn execute(args: CheckArgs, config: &Config, json_mode: bool) -> Result<()> {
    let maturity = AgentMaturity::from_str(&args.maturity)
        .ok_or_else(|| anyhow::anyhow!("Invalid maturity: {}", args.maturity))?;

    let metadata = match args.metadata {
        Some(ref raw) => serde_json::from_str(raw).context("--metadata must be valid JSON")?,
        None => serde_json::Value::Null,
    };

    let runtime = build_runtime(config).await?;
    let request = AuthorizationRequest::new(args.agent, args.action, maturity).with_metadata(metadata);
    let decision = runtime.service.authorize(&request).await?;

    let out = CheckOutput {
        required: runtime.evaluator.min_maturity(&decision.action_type),
        agent_id: decision.agent_id,
        action_type: decision.action_type,
        maturity,
        allowed: decision.allowed,
        source: decision.source.as_str().to_string(),
    };
    output(&out, json_mode);
    Ok(())
}
