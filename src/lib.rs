//! ATOM Governance - maturity-gated agent authorization
//!
//! Answers "may agent X, at maturity level Y, perform action Z" with a
//! bounded, time-limited decision cache in front of an authoritative policy
//! evaluator.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Models, errors and ports
//! - **Service Layer** (`services`): The governance cache, policy evaluator,
//!   authorization service and maintenance daemon
//! - **Infrastructure Layer** (`infrastructure`): Clocks, configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use atom_governance::{
//!     AgentMaturity, AuthorizationRequest, AuthorizationService,
//!     GovernanceAuthorizationCache, MaturityPolicyEvaluator,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cache = Arc::new(GovernanceAuthorizationCache::new(1000, 60)?);
//! let service = AuthorizationService::new(cache, Arc::new(MaturityPolicyEvaluator::default()));
//!
//! let request = AuthorizationRequest::new("agent-7", "stream_chat", AgentMaturity::Intern);
//! let decision = service.authorize(&request).await?;
//! assert!(decision.allowed);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AgentMaturity, AuthorizationDecision, AuthorizationKey, AuthorizationRequest, CacheStats,
    Config, DecisionSource,
};
pub use domain::ports::{AuditSink, Clock, PolicyEvaluator};
pub use domain::{DomainError, DomainResult, GovernanceError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    AuthorizationService, CacheMaintenanceDaemon, GovernanceAuthorizationCache,
    MaturityPolicyEvaluator,
};
