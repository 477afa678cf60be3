//! Authorization service.
//!
//! Async boundary in front of the governance cache. Looks the request up in
//! the cache, falls back to the policy evaluator on a miss, stores the fresh
//! verdict, and forwards every decision to the audit sink.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    AuthorizationAuditRecord, AuthorizationDecision, AuthorizationRequest, CacheStats,
    DecisionSource,
};
use crate::domain::ports::{AuditSink, Clock, PolicyEvaluator};
use crate::infrastructure::clock::SystemClock;
use crate::services::governance_cache::GovernanceAuthorizationCache;

/// Cache-aside authorization for agent actions.
pub struct AuthorizationService {
    cache: Arc<GovernanceAuthorizationCache>,
    evaluator: Arc<dyn PolicyEvaluator>,
    audit_sink: Option<Arc<dyn AuditSink>>,
    clock: Arc<dyn Clock>,
}

impl AuthorizationService {
    pub fn new(cache: Arc<GovernanceAuthorizationCache>, evaluator: Arc<dyn PolicyEvaluator>) -> Self {
        Self {
            cache,
            evaluator,
            audit_sink: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Record every decision to `sink`.
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }

    /// Clock used to stamp decisions.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Decide whether the agent may perform the requested action.
    ///
    /// Evaluator errors are returned as-is and nothing is cached, so the next
    /// request consults the evaluator again. Audit failures are logged and do
    /// not change the decision.
    #[instrument(skip(self, request), fields(agent_id = %request.agent_id, action_type = %request.action_type))]
    pub async fn authorize(&self, request: &AuthorizationRequest) -> DomainResult<AuthorizationDecision> {
        let key = request.key()?;

        let (allowed, source) = match self.cache.lookup(&key) {
            Some(allowed) => (allowed, DecisionSource::Cache),
            None => {
                let allowed = self.evaluator.evaluate(request).await?;
                self.cache.store(key, allowed);
                (allowed, DecisionSource::Policy)
            }
        };

        let decision = AuthorizationDecision {
            agent_id: request.agent_id.clone(),
            action_type: request.action_type.clone(),
            allowed,
            source,
            decided_at: self.clock.now(),
        };

        debug!(allowed, source = source.as_str(), "authorization decided");

        if let Some(sink) = &self.audit_sink {
            let record = AuthorizationAuditRecord::new(request, &decision);
            if let Err(e) = sink.record(&record).await {
                warn!(error = %e, "failed to record authorization audit event");
            }
        }

        Ok(decision)
    }

    /// Convenience wrapper returning only the verdict.
    pub async fn is_allowed(&self, request: &AuthorizationRequest) -> DomainResult<bool> {
        Ok(self.authorize(request).await?.allowed)
    }

    /// Forget every cached decision for an agent, e.g. after its maturity changed.
    pub fn invalidate_agent(&self, agent_id: &str) -> usize {
        self.cache.invalidate(agent_id, None)
    }

    /// Forget one cached decision.
    pub fn invalidate_action(&self, agent_id: &str, action_type: &str) -> usize {
        self.cache.invalidate(agent_id, Some(action_type))
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache(&self) -> &Arc<GovernanceAuthorizationCache> {
        &self.cache
    }
}
