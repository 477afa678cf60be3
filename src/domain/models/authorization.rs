//! Authorization requests, decisions and cached verdicts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::maturity::AgentMaturity;
use crate::domain::errors::GovernanceError;

/// Separator between agent id and action type in the rendered key.
pub const KEY_SEPARATOR: char = ':';

/// Identifies one cached decision: `"{agent_id}:{action_type}"`.
///
/// Both halves are non-empty and contain no separator, so the rendered key
/// always holds exactly one `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuthorizationKey {
    agent_id: String,
    action_type: String,
}

impl AuthorizationKey {
    pub fn new(
        agent_id: impl Into<String>,
        action_type: impl Into<String>,
    ) -> Result<Self, GovernanceError> {
        let agent_id = agent_id.into();
        let action_type = action_type.into();

        if let Some(reason) = component_error("agent_id", &agent_id)
            .or_else(|| component_error("action_type", &action_type))
        {
            return Err(GovernanceError::InvalidKey {
                key: format!("{agent_id}{KEY_SEPARATOR}{action_type}"),
                reason,
            });
        }

        Ok(Self {
            agent_id,
            action_type,
        })
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Whether this key holds a decision for `agent_id`.
    pub fn belongs_to(&self, agent_id: &str) -> bool {
        self.agent_id == agent_id
    }
}

fn component_error(name: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        Some(format!("{name} is empty"))
    } else if value.contains(KEY_SEPARATOR) {
        Some(format!("{name} must not contain '{KEY_SEPARATOR}'"))
    } else {
        None
    }
}

impl fmt::Display for AuthorizationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.agent_id, KEY_SEPARATOR, self.action_type)
    }
}

impl FromStr for AuthorizationKey {
    type Err = GovernanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (agent_id, action_type) =
            s.split_once(KEY_SEPARATOR)
                .ok_or_else(|| GovernanceError::InvalidKey {
                    key: s.to_string(),
                    reason: format!("missing '{KEY_SEPARATOR}' separator"),
                })?;
        Self::new(agent_id, action_type)
    }
}

/// A cached authorization verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub allowed: bool,
    pub cached_at: DateTime<Utc>,
}

/// Point-in-time snapshot of cache counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
    /// Entries dropped because they outlived the TTL
    pub expirations: u64,
    pub size: usize,
    pub max_size: usize,
    pub ttl_seconds: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    /// `hits / (hits + misses)`, or `0.0` before the first lookup.
    pub fn compute_hit_rate(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

/// A request to perform an action on behalf of an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub agent_id: String,
    pub action_type: String,
    pub maturity: AgentMaturity,
    /// Free-form description of the requested action
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl AuthorizationRequest {
    pub fn new(
        agent_id: impl Into<String>,
        action_type: impl Into<String>,
        maturity: AgentMaturity,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            action_type: action_type.into(),
            maturity,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Cache key for this request.
    pub fn key(&self) -> Result<AuthorizationKey, GovernanceError> {
        AuthorizationKey::new(self.agent_id.as_str(), self.action_type.as_str())
    }
}

/// Where a decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Cache,
    Policy,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Policy => "policy",
        }
    }
}

/// Outcome of an authorization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDecision {
    pub agent_id: String,
    pub action_type: String,
    pub allowed: bool,
    pub source: DecisionSource,
    pub decided_at: DateTime<Utc>,
}

/// Audit trail record for one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationAuditRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub agent_id: String,
    pub action_type: String,
    pub maturity: AgentMaturity,
    pub allowed: bool,
    pub source: DecisionSource,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl AuthorizationAuditRecord {
    pub fn new(request: &AuthorizationRequest, decision: &AuthorizationDecision) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: decision.decided_at,
            agent_id: decision.agent_id.clone(),
            action_type: decision.action_type.clone(),
            maturity: request.maturity,
            allowed: decision.allowed,
            source: decision.source,
            metadata: request.metadata.clone(),
        }
    }
}
