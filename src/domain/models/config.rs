use serde::{Deserialize, Serialize};

use super::maturity::AgentMaturity;

/// Main configuration structure for the governance layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Authorization cache sizing
    #[serde(default)]
    pub cache: CacheConfig,

    /// Background stale-entry sweeps
    #[serde(default)]
    pub maintenance: MaintenanceConfig,

    /// Maturity policy rules
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Decision audit trail
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Authorization cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Upper bound on live entries (recognized range 10-10,000)
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Seconds before an entry is stale (recognized range 1-86,400)
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

const fn default_max_size() -> usize {
    1000
}

const fn default_ttl_seconds() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

/// Cache maintenance daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaintenanceConfig {
    /// Seconds between `expire_stale` sweeps
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Sweep once immediately when the daemon starts
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

const fn default_interval_seconds() -> u64 {
    30
}

const fn default_true() -> bool {
    true
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            run_on_startup: default_true(),
        }
    }
}

/// Minimum maturity required for one action type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActionRule {
    pub action_type: String,
    pub min_maturity: AgentMaturity,
}

impl ActionRule {
    pub fn new(action_type: impl Into<String>, min_maturity: AgentMaturity) -> Self {
        Self {
            action_type: action_type.into(),
            min_maturity,
        }
    }
}

/// Maturity-gated policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PolicyConfig {
    /// Applied to action types without an explicit rule
    #[serde(default = "default_min_maturity")]
    pub default_min_maturity: AgentMaturity,

    #[serde(default = "default_rules")]
    pub rules: Vec<ActionRule>,
}

const fn default_min_maturity() -> AgentMaturity {
    AgentMaturity::Supervised
}

fn default_rules() -> Vec<ActionRule> {
    vec![
        ActionRule::new("read", AgentMaturity::Student),
        ActionRule::new("stream_chat", AgentMaturity::Intern),
        ActionRule::new("present_chart", AgentMaturity::Intern),
        ActionRule::new("submit_form", AgentMaturity::Supervised),
        ActionRule::new("canvas_execute_javascript", AgentMaturity::Autonomous),
        ActionRule::new("delete", AgentMaturity::Autonomous),
    ]
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            default_min_maturity: default_min_maturity(),
            rules: default_rules(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditConfig {
    #[serde(default)]
    pub enabled: bool,

    /// JSON-lines file receiving one record per decision
    #[serde(default = "default_audit_path")]
    pub path: String,
}

fn default_audit_path() -> String {
    ".atom/audit.jsonl".to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_audit_path(),
        }
    }
}
