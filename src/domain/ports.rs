//! Ports connecting the governance core to its collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::DomainResult;
use super::models::{AuthorizationAuditRecord, AuthorizationRequest};

/// Authoritative source of authorization decisions.
///
/// Consulted on every cache miss. Implementations own all policy logic;
/// the cache only memoizes what they return.
#[async_trait]
pub trait PolicyEvaluator: Send + Sync {
    /// Decide whether the request is allowed
    ///
    /// # Returns
    /// * `Ok(true)` / `Ok(false)` - the verdict
    /// * `Err(DomainError)` - the evaluator could not decide; callers must not cache
    async fn evaluate(&self, request: &AuthorizationRequest) -> DomainResult<bool>;
}

/// Destination for the allow/deny audit trail.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, record: &AuthorizationAuditRecord) -> DomainResult<()>;
}

/// Source of the current time for TTL checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
