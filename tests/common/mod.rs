//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::sync::Arc;

use atom_governance::infrastructure::clock::ManualClock;
use atom_governance::{AuthorizationKey, GovernanceAuthorizationCache};

/// Build a key, panicking on invalid input
#[allow(dead_code)]
pub fn key(agent_id: &str, action_type: &str) -> AuthorizationKey {
    AuthorizationKey::new(agent_id, action_type).expect("valid authorization key")
}

/// Cache driven by a manual clock starting at t=0
#[allow(dead_code)]
pub fn cache_at_epoch(
    max_size: usize,
    ttl_seconds: u64,
) -> (Arc<GovernanceAuthorizationCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at_epoch());
    let cache = GovernanceAuthorizationCache::with_clock(max_size, ttl_seconds, clock.clone())
        .expect("valid cache configuration");
    (Arc::new(cache), clock)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Wait for a condition to be true with timeout
///
/// Polls the predicate every 10ms until it returns true or timeout is reached.
#[allow(dead_code)]
pub async fn wait_for<F>(mut predicate: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);

    while start.elapsed() < timeout {
        if predicate() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    false
}
