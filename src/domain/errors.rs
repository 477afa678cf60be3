//! Domain errors for the ATOM governance layer.

use thiserror::Error;

/// Errors raised by the governance cache on malformed input.
///
/// These are programmer errors (a malformed call), never runtime conditions
/// to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("Invalid authorization key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Invalid cache configuration: {0}")]
    InvalidCacheConfig(String),
}

/// Domain-level errors that can occur while authorizing agent actions.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error("Policy evaluation failed for {agent_id}:{action_type}: {reason}")]
    PolicyEvaluation {
        agent_id: String,
        action_type: String,
        reason: String,
    },

    #[error("Audit sink error: {0}")]
    Audit(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Audit(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governance_error_converts_into_domain_error() {
        let err: DomainError = GovernanceError::InvalidKey {
            key: ":run".to_string(),
            reason: "agent_id is empty".to_string(),
        }
        .into();

        assert!(matches!(err, DomainError::Governance(GovernanceError::InvalidKey { .. })));
        assert_eq!(
            err.to_string(),
            "Invalid authorization key ':run': agent_id is empty"
        );
    }

    #[test]
    fn test_policy_evaluation_message() {
        let err = DomainError::PolicyEvaluation {
            agent_id: "a1".to_string(),
            action_type: "delete".to_string(),
            reason: "evaluator offline".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Policy evaluation failed for a1:delete: evaluator offline"
        );
    }
}
