//! Governance authorization cache.
//!
//! Memoizes allow/deny verdicts keyed by `(agent_id, action_type)` with
//! TTL-based expiry and a bounded size. Eviction is least-recently-used:
//! a successful lookup or an overwrite marks the entry most-recently-used,
//! and a full cache drops its least-recently-used entry before inserting a
//! new key. Without intervening lookups this is plain insertion order.
//!
//! All state (entries and counters) sits behind one mutex, so every call is
//! serialized and each lookup contributes to exactly one of hits/misses.
//! The cache holds no policy logic; a miss always sends the caller back to
//! the authoritative [`PolicyEvaluator`](crate::domain::ports::PolicyEvaluator).

use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::GovernanceError;
use crate::domain::models::{AuthorizationKey, CacheConfig, CacheEntry, CacheStats};
use crate::domain::ports::Clock;
use crate::infrastructure::clock::SystemClock;

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    hits: u64,
    misses: u64,
    evictions: u64,
    invalidations: u64,
    expirations: u64,
}

struct CacheState {
    entries: LruCache<AuthorizationKey, CacheEntry>,
    counters: Counters,
}

/// Bounded, time-limited memoization of authorization decisions.
///
/// Constructed explicitly and shared as `Arc<GovernanceAuthorizationCache>`;
/// there is no process-global instance.
pub struct GovernanceAuthorizationCache {
    state: Mutex<CacheState>,
    max_size: NonZeroUsize,
    ttl: Duration,
    ttl_seconds: u64,
    clock: Arc<dyn Clock>,
}

impl GovernanceAuthorizationCache {
    /// Create a cache using the system clock.
    pub fn new(max_size: usize, ttl_seconds: u64) -> Result<Self, GovernanceError> {
        Self::with_clock(max_size, ttl_seconds, Arc::new(SystemClock))
    }

    /// Create a cache reading time from `clock`.
    pub fn with_clock(
        max_size: usize,
        ttl_seconds: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, GovernanceError> {
        let max_size = NonZeroUsize::new(max_size).ok_or_else(|| {
            GovernanceError::InvalidCacheConfig("max_size must be at least 1".to_string())
        })?;

        if ttl_seconds == 0 {
            return Err(GovernanceError::InvalidCacheConfig(
                "ttl_seconds must be at least 1".to_string(),
            ));
        }
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                GovernanceError::InvalidCacheConfig(format!(
                    "ttl_seconds {ttl_seconds} is out of range"
                ))
            })?;

        Ok(Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(max_size),
                counters: Counters::default(),
            }),
            max_size,
            ttl,
            ttl_seconds,
            clock,
        })
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self, GovernanceError> {
        Self::new(config.max_size, config.ttl_seconds)
    }

    pub fn from_config_with_clock(
        config: &CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, GovernanceError> {
        Self::with_clock(config.max_size, config.ttl_seconds, clock)
    }

    /// Look up a cached verdict.
    ///
    /// Returns `None` when the key is absent or stale; a stale entry is
    /// removed as part of the lookup. A hit marks the entry most-recently-used.
    pub fn lookup(&self, key: &AuthorizationKey) -> Option<bool> {
        let now = self.clock.now();
        let mut state = self.state.lock();

        let Some(entry) = state.entries.get(key).copied() else {
            state.counters.misses += 1;
            return None;
        };

        if self.is_stale(&entry, now) {
            state.entries.pop(key);
            state.counters.misses += 1;
            state.counters.expirations += 1;
            debug!(key = %key, cached_at = %entry.cached_at, "dropped stale authorization on lookup");
            return None;
        }

        state.counters.hits += 1;
        Some(entry.allowed)
    }

    /// Insert or overwrite a verdict, stamped with the current time.
    ///
    /// When the key is new and the cache is full, the least-recently-used
    /// entry is evicted first, so the size never exceeds `max_size`.
    pub fn store(&self, key: AuthorizationKey, allowed: bool) {
        let cached_at = self.clock.now();
        let mut state = self.state.lock();

        if !state.entries.contains(&key) && state.entries.len() >= self.max_size.get() {
            if let Some((evicted, _)) = state.entries.pop_lru() {
                state.counters.evictions += 1;
                debug!(evicted = %evicted, incoming = %key, "evicted least recently used authorization");
            }
        }

        state.entries.put(key, CacheEntry { allowed, cached_at });
    }

    /// Remove cached verdicts for an agent.
    ///
    /// With `action_type`, removes at most that one key; without, removes
    /// every key of the agent. Returns the number removed.
    pub fn invalidate(&self, agent_id: &str, action_type: Option<&str>) -> usize {
        let mut state = self.state.lock();

        let removed = match action_type {
            Some(action_type) => AuthorizationKey::new(agent_id, action_type)
                .ok()
                .and_then(|key| state.entries.pop(&key))
                .map_or(0, |_| 1),
            None => {
                let keys: Vec<AuthorizationKey> = state
                    .entries
                    .iter()
                    .filter(|(key, _)| key.belongs_to(agent_id))
                    .map(|(key, _)| key.clone())
                    .collect();
                for key in &keys {
                    state.entries.pop(key);
                }
                keys.len()
            }
        };

        state.counters.invalidations += removed as u64;
        if removed > 0 {
            debug!(agent_id, action_type, removed, "invalidated cached authorizations");
        }
        removed
    }

    /// Remove every stale entry and return how many were dropped.
    pub fn expire_stale(&self) -> usize {
        let now = self.clock.now();
        let mut state = self.state.lock();

        let stale: Vec<AuthorizationKey> = state
            .entries
            .iter()
            .filter(|(_, entry)| self.is_stale(entry, now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            state.entries.pop(key);
        }

        state.counters.expirations += stale.len() as u64;
        if !stale.is_empty() {
            debug!(expired = stale.len(), remaining = state.entries.len(), "expired stale authorizations");
        }
        stale.len()
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let Counters {
            hits,
            misses,
            evictions,
            invalidations,
            expirations,
        } = state.counters;

        CacheStats {
            hits,
            misses,
            evictions,
            invalidations,
            expirations,
            size: state.entries.len(),
            max_size: self.max_size.get(),
            ttl_seconds: self.ttl_seconds,
            hit_rate: CacheStats::compute_hit_rate(hits, misses),
        }
    }

    /// Zero all counters. Entries are kept.
    pub fn reset_stats(&self) {
        self.state.lock().counters = Counters::default();
    }

    /// Drop all entries. Counters are kept.
    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached keys, most recently used first.
    pub fn keys(&self) -> Vec<AuthorizationKey> {
        self.state
            .lock()
            .entries
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn max_size(&self) -> usize {
        self.max_size.get()
    }

    pub fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ttl_seconds)
    }

    fn is_stale(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.cached_at) > self.ttl
    }
}

impl std::fmt::Debug for GovernanceAuthorizationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceAuthorizationCache")
            .field("max_size", &self.max_size)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("size", &self.len())
            .finish_non_exhaustive()
    }
}
