//! Maturity-gated policy evaluator.
//!
//! Each action type names the minimum [`AgentMaturity`] allowed to perform
//! it. This is the only enforcement point for gated actions such as
//! `canvas_execute_javascript`; callers must not add a second hardcoded
//! maturity comparison.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::trace;

use crate::domain::errors::{DomainResult, GovernanceError};
use crate::domain::models::{
    ActionRule, AgentMaturity, AuthorizationRequest, PolicyConfig, KEY_SEPARATOR,
};
use crate::domain::ports::PolicyEvaluator;

/// Evaluates requests against per-action minimum maturity levels.
#[derive(Debug, Clone)]
pub struct MaturityPolicyEvaluator {
    rules: HashMap<String, AgentMaturity>,
    default_min_maturity: AgentMaturity,
}

impl MaturityPolicyEvaluator {
    pub fn new(default_min_maturity: AgentMaturity) -> Self {
        Self {
            rules: HashMap::new(),
            default_min_maturity,
        }
    }

    /// Build from configuration. Later rules for the same action win.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, GovernanceError> {
        let mut evaluator = Self::new(config.default_min_maturity);
        for rule in &config.rules {
            evaluator = evaluator.with_rule(rule.action_type.as_str(), rule.min_maturity)?;
        }
        Ok(evaluator)
    }

    /// Add or replace the rule for one action type.
    pub fn with_rule(
        mut self,
        action_type: impl Into<String>,
        min_maturity: AgentMaturity,
    ) -> Result<Self, GovernanceError> {
        let action_type = action_type.into();
        if action_type.is_empty() || action_type.contains(KEY_SEPARATOR) {
            return Err(GovernanceError::InvalidKey {
                key: action_type,
                reason: format!("rule action_type must be non-empty and must not contain '{KEY_SEPARATOR}'"),
            });
        }
        self.rules.insert(action_type, min_maturity);
        Ok(self)
    }

    /// Minimum maturity for `action_type`, falling back to the default.
    pub fn min_maturity(&self, action_type: &str) -> AgentMaturity {
        self.rules
            .get(action_type)
            .copied()
            .unwrap_or(self.default_min_maturity)
    }

    pub fn default_min_maturity(&self) -> AgentMaturity {
        self.default_min_maturity
    }

    /// Configured rules sorted by action type.
    pub fn rules(&self) -> Vec<ActionRule> {
        let mut rules: Vec<ActionRule> = self
            .rules
            .iter()
            .map(|(action_type, min)| ActionRule::new(action_type.as_str(), *min))
            .collect();
        rules.sort_by(|a, b| a.action_type.cmp(&b.action_type));
        rules
    }

    /// Synchronous verdict.
    pub fn is_allowed(&self, action_type: &str, maturity: AgentMaturity) -> bool {
        maturity.meets(self.min_maturity(action_type))
    }
}

impl Default for MaturityPolicyEvaluator {
    fn default() -> Self {
        // Default rules are validated constants
        Self::from_config(&PolicyConfig::default())
            .unwrap_or_else(|_| Self::new(AgentMaturity::Autonomous))
    }
}

#[async_trait]
impl PolicyEvaluator for MaturityPolicyEvaluator {
    async fn evaluate(&self, request: &AuthorizationRequest) -> DomainResult<bool> {
        let required = self.min_maturity(&request.action_type);
        let allowed = request.maturity.meets(required);

        trace!(
            agent_id = %request.agent_id,
            action_type = %request.action_type,
            maturity = %request.maturity,
            required = %required,
            allowed,
            "evaluated maturity policy"
        );

        Ok(allowed)
    }
}
