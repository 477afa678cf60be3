//! `atom-governance simulate`: drive a synthetic workload through the cache.
//!
//! Each agent runs on its own task and requests every configured action type
//! once per round, while the maintenance daemon sweeps in the background.

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{AgentMaturity, AuthorizationRequest, CacheStats, Config};
use crate::infrastructure::setup::build_runtime;
use crate::services::{CacheMaintenanceDaemon, MaintenanceDaemonConfig};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Number of concurrent agents
    #[arg(short, long, default_value = "8")]
    pub agents: usize,

    /// Requests per agent per action type
    #[arg(short, long, default_value = "25")]
    pub rounds: usize,

    /// Maturity shared by all simulated agents
    #[arg(short, long, default_value = "supervised")]
    pub maturity: String,
}

#[derive(Debug, serde::Serialize)]
pub struct SimulateOutput {
    pub requests: u64,
    pub allowed: u64,
    pub denied: u64,
    pub elapsed_ms: u64,
    pub stats: CacheStats,
}

impl CommandOutput for SimulateOutput {
    fn to_human(&self) -> String {
        format!(
            "Simulated {} request(s) in {} ms: {} allowed, {} denied\n\n{}",
            self.requests,
            self.elapsed_ms,
            self.allowed,
            self.denied,
            TableFormatter::new().format_stats(&self.stats)
        )
    }
}

pub async fn execute(args: SimulateArgs, config: &Config, json_mode: bool) -> Result<()> {
    let maturity = AgentMaturity::from_str(&args.maturity)
        .ok_or_else(|| anyhow::anyhow!("Invalid maturity: {}", args.maturity))?;

    let runtime = build_runtime(config).await?;
    let actions: Arc<Vec<String>> = Arc::new(
        runtime
            .evaluator
            .rules()
            .into_iter()
            .map(|rule| rule.action_type)
            .collect(),
    );

    let daemon = CacheMaintenanceDaemon::new(
        runtime.cache.clone(),
        MaintenanceDaemonConfig::from(&config.maintenance),
    );
    let daemon_handle = daemon.handle();
    let mut events = daemon.run();
    tokio::spawn(async move { while events.recv().await.is_some() {} });

    let service = Arc::new(runtime.service);
    let started = Instant::now();

    let mut workers = Vec::with_capacity(args.agents);
    for agent in 0..args.agents {
        let service = service.clone();
        let actions = actions.clone();
        let rounds = args.rounds;
        workers.push(tokio::spawn(async move {
            let agent_id = format!("sim-agent-{agent}");
            let mut allowed = 0u64;
            let mut denied = 0u64;
            for _ in 0..rounds {
                for action in actions.iter() {
                    let request = AuthorizationRequest::new(agent_id.as_str(), action.as_str(), maturity);
                    if service.is_allowed(&request).await? {
                        allowed += 1;
                    } else {
                        denied += 1;
                    }
                }
            }
            Ok::<_, crate::domain::DomainError>((allowed, denied))
        }));
    }

    let mut allowed = 0u64;
    let mut denied = 0u64;
    for worker in workers {
        let (a, d) = worker.await.context("simulation worker panicked")??;
        allowed += a;
        denied += d;
    }
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    daemon_handle.stop();

    let stats = service.stats();
    info!(requests = allowed + denied, hit_rate = stats.hit_rate, "simulation finished");

    let out = SimulateOutput {
        requests: allowed + denied,
        allowed,
        denied,
        elapsed_ms,
        stats,
    };
    output(&out, json_mode);
    Ok(())
}
