//! Setup and wiring
//!
//! Handles:
//! - Project initialization (`.atom/config.yaml` creation)
//! - Building the cache, policy evaluator and authorization service from config

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::domain::models::Config;
use crate::infrastructure::logging::AuditLogger;
use crate::services::{AuthorizationService, GovernanceAuthorizationCache, MaturityPolicyEvaluator};

/// Default configuration template content
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ATOM Governance Configuration
# Override settings by editing this file or setting environment variables
# with ATOM_ prefix
#
# Example environment variables:
#   export ATOM_CACHE__MAX_SIZE=5000
#   export ATOM_CACHE__TTL_SECONDS=120
#   export ATOM_LOGGING__LEVEL=debug

# Authorization decision cache
cache:
  # Upper bound on cached decisions (recognized range 10-10000)
  max_size: 1000

  # Seconds before a cached decision is stale (recognized range 1-86400)
  ttl_seconds: 60

# Background sweeps of stale decisions
maintenance:
  # Seconds between sweeps (1-86400)
  interval_seconds: 30
  run_on_startup: true

# Minimum agent maturity per action type
# Levels: student < intern < supervised < autonomous
policy:
  default_min_maturity: supervised
  rules:
    - action_type: read
      min_maturity: student
    - action_type: stream_chat
      min_maturity: intern
    - action_type: present_chart
      min_maturity: intern
    - action_type: submit_form
      min_maturity: supervised
    - action_type: canvas_execute_javascript
      min_maturity: autonomous
    - action_type: delete
      min_maturity: autonomous

# Logging configuration
logging:
  # Log level: trace, debug, info, warn, error
  level: "info"

  # Log format: json, pretty
  format: "json"

# Decision audit trail (JSON lines)
audit:
  enabled: false
  path: ".atom/audit.jsonl"
"#;

/// Write `.atom/config.yaml` under `root`.
///
/// Returns the config path. Fails if the file exists and `force` is false.
pub fn init_project(root: impl AsRef<Path>, force: bool) -> Result<PathBuf> {
    let config_dir = root.as_ref().join(".atom");
    let config_path = config_dir.join("config.yaml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("failed to create {}", config_dir.display()))?;
    fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    info!(path = %config_path.display(), "wrote default configuration");
    Ok(config_path)
}

/// Everything needed to authorize requests in one process.
pub struct GovernanceRuntime {
    pub cache: Arc<GovernanceAuthorizationCache>,
    pub evaluator: Arc<MaturityPolicyEvaluator>,
    pub service: AuthorizationService,
}

/// Build the cache, evaluator and service described by `config`.
pub async fn build_runtime(config: &Config) -> Result<GovernanceRuntime> {
    let cache = Arc::new(
        GovernanceAuthorizationCache::from_config(&config.cache)
            .context("invalid cache configuration")?,
    );
    let evaluator = Arc::new(
        MaturityPolicyEvaluator::from_config(&config.policy)
            .context("invalid policy configuration")?,
    );

    let mut service = AuthorizationService::new(cache.clone(), evaluator.clone());
    if config.audit.enabled {
        let audit = AuditLogger::new(&config.audit.path).await?;
        service = service.with_audit_sink(Arc::new(audit));
    }

    Ok(GovernanceRuntime {
        cache,
        evaluator,
        service,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ConfigLoader;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_is_valid() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        ConfigLoader::validate(&config).unwrap();
        assert_eq!(config.cache.max_size, 1000);
        assert_eq!(config.policy.rules.len(), 6);
    }

    #[test]
    fn test_init_project_refuses_overwrite() {
        let dir = TempDir::new().unwrap();

        let path = init_project(dir.path(), false).unwrap();
        assert!(path.exists());
        assert!(init_project(dir.path(), false).is_err());
        assert!(init_project(dir.path(), true).is_ok());
    }

    #[tokio::test]
    async fn test_build_runtime_with_audit() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.cache.max_size = 5;
        config.audit.enabled = true;
        config.audit.path = dir.path().join("audit.jsonl").display().to_string();

        let runtime = build_runtime(&config).await.unwrap();
        assert_eq!(runtime.cache.max_size(), 5);
        assert!(dir.path().join("audit.jsonl").exists());
    }
}
