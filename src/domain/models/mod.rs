pub mod authorization;
pub mod config;
pub mod maturity;

pub use authorization::{
    AuthorizationAuditRecord, AuthorizationDecision, AuthorizationKey, AuthorizationRequest,
    CacheEntry, CacheStats, DecisionSource, KEY_SEPARATOR,
};
pub use config::{
    ActionRule, AuditConfig, CacheConfig, Config, LoggingConfig, MaintenanceConfig, PolicyConfig,
};
pub use maturity::AgentMaturity;
