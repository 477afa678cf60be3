use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

use crate::domain::models::config::Config;
use crate::domain::models::KEY_SEPARATOR;
use crate::services::cache_maintenance_daemon::MAX_SWEEP_INTERVAL;

/// Recognized operating range for `cache.max_size`.
pub const RECOMMENDED_MAX_SIZE: std::ops::RangeInclusive<usize> = 10..=10_000;

/// Recognized operating range for `cache.ttl_seconds`.
pub const RECOMMENDED_TTL_SECONDS: std::ops::RangeInclusive<u64> = 1..=86_400;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid cache max_size: {0}. Must be at least 1")]
    InvalidMaxSize(usize),

    #[error("Invalid cache ttl_seconds: {0}. Must be at least 1")]
    InvalidTtl(u64),

    #[error("Invalid maintenance interval_seconds: {0}. Must be between 1 and 86400")]
    InvalidMaintenanceInterval(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid policy rule action_type '{0}': must be non-empty and must not contain ':'")]
    InvalidRuleAction(String),

    #[error("Duplicate policy rule for action_type '{0}'")]
    DuplicateRule(String),

    #[error("Audit path cannot be empty when audit is enabled")]
    EmptyAuditPath,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .atom/config.yaml (project config)
    /// 3. .atom/local.yaml (project local overrides, optional)
    /// 4. Environment variables (ATOM_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".atom/config.yaml"))
            .merge(Yaml::file(".atom/local.yaml"))
            .merge(Env::prefixed("ATOM_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring ATOM_* overrides
    ///
    /// Unlike the project hierarchy, the named file must exist.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        if !path.as_ref().exists() {
            anyhow::bail!("Config file not found: {}", path.as_ref().display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("ATOM_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// Values outside the recognized ranges are accepted with a warning.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.cache.max_size == 0 {
            return Err(ConfigError::InvalidMaxSize(config.cache.max_size));
        }
        if config.cache.ttl_seconds == 0 {
            return Err(ConfigError::InvalidTtl(config.cache.ttl_seconds));
        }
        if !RECOMMENDED_MAX_SIZE.contains(&config.cache.max_size) {
            warn!(max_size = config.cache.max_size, "cache max_size outside recognized range 10-10000");
        }
        if !RECOMMENDED_TTL_SECONDS.contains(&config.cache.ttl_seconds) {
            warn!(ttl_seconds = config.cache.ttl_seconds, "cache ttl_seconds outside recognized range 1-86400");
        }

        if config.maintenance.interval_seconds == 0
            || config.maintenance.interval_seconds > MAX_SWEEP_INTERVAL.as_secs()
        {
            return Err(ConfigError::InvalidMaintenanceInterval(
                config.maintenance.interval_seconds,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let mut seen = HashSet::new();
        for rule in &config.policy.rules {
            if rule.action_type.is_empty() || rule.action_type.contains(KEY_SEPARATOR) {
                return Err(ConfigError::InvalidRuleAction(rule.action_type.clone()));
            }
            if !seen.insert(rule.action_type.as_str()) {
                return Err(ConfigError::DuplicateRule(rule.action_type.clone()));
            }
        }

        if config.audit.enabled && config.audit.path.trim().is_empty() {
            return Err(ConfigError::EmptyAuditPath);
        }

        Ok(())
    }
}
