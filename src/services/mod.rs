pub mod authorization_service;
pub mod cache_maintenance_daemon;
pub mod governance_cache;
pub mod maturity_policy;

pub use authorization_service::AuthorizationService;
pub use cache_maintenance_daemon::{
    CacheMaintenanceDaemon, DaemonHandle, MaintenanceDaemonConfig, MaintenanceEvent, StopReason,
};
pub use governance_cache::GovernanceAuthorizationCache;
pub use maturity_policy::MaturityPolicyEvaluator;
