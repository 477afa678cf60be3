use atom_governance::infrastructure::clock::ManualClock;
use atom_governance::{AuthorizationKey, GovernanceAuthorizationCache};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Store { agent: u8, action: u8, allowed: bool },
    Lookup { agent: u8, action: u8 },
    InvalidateAgent { agent: u8 },
    InvalidateAction { agent: u8, action: u8 },
    Advance { seconds: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..12, 0u8..4, any::<bool>())
            .prop_map(|(agent, action, allowed)| Op::Store { agent, action, allowed }),
        4 => (0u8..12, 0u8..4).prop_map(|(agent, action)| Op::Lookup { agent, action }),
        1 => (0u8..12).prop_map(|agent| Op::InvalidateAgent { agent }),
        1 => (0u8..12, 0u8..4).prop_map(|(agent, action)| Op::InvalidateAction { agent, action }),
        1 => (0u8..30).prop_map(|seconds| Op::Advance { seconds }),
    ]
}

fn key(agent: u8, action: u8) -> AuthorizationKey {
    AuthorizationKey::new(format!("agent-{agent}"), format!("action-{action}")).unwrap()
}

fn new_cache(max_size: usize, ttl_seconds: u64) -> (GovernanceAuthorizationCache, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at_epoch());
    let cache = GovernanceAuthorizationCache::with_clock(max_size, ttl_seconds, clock.clone()).unwrap();
    (cache, clock)
}

fn apply(cache: &GovernanceAuthorizationCache, clock: &ManualClock, op: &Op) {
    match *op {
        Op::Store { agent, action, allowed } => cache.store(key(agent, action), allowed),
        Op::Lookup { agent, action } => {
            cache.lookup(&key(agent, action));
        }
        Op::InvalidateAgent { agent } => {
            cache.invalidate(&format!("agent-{agent}"), None);
        }
        Op::InvalidateAction { agent, action } => {
            cache.invalidate(&format!("agent-{agent}"), Some(&format!("action-{action}")));
        }
        Op::Advance { seconds } => clock.advance_secs(i64::from(seconds)),
    }
}

proptest! {
    /// Property: The cache never holds more than max_size entries
    #[test]
    fn prop_size_never_exceeds_bound(
        max_size in 1usize..16,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let (cache, clock) = new_cache(max_size, 60);

        for op in &ops {
            apply(&cache, &clock, op);
            let stats = cache.stats();
            prop_assert!(stats.size <= max_size);
            prop_assert_eq!(stats.size, cache.len());
        }
    }

    /// Property: Every lookup is counted as exactly one hit or one miss
    #[test]
    fn prop_lookups_partition_into_hits_and_misses(
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let (cache, clock) = new_cache(8, 20);
        let lookups = ops.iter().filter(|op| matches!(op, Op::Lookup { .. })).count() as u64;

        for op in &ops {
            apply(&cache, &clock, op);
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits + stats.misses, lookups);
        prop_assert!((0.0..=1.0).contains(&stats.hit_rate));
        if lookups == 0 {
            prop_assert_eq!(stats.hit_rate, 0.0);
        }
    }

    /// Property: Lookups only return the most recently stored verdict
    #[test]
    fn prop_hits_return_last_stored_value(
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let (cache, clock) = new_cache(64, 1000);
        let mut last = std::collections::HashMap::new();

        for op in &ops {
            match *op {
                Op::Store { agent, action, allowed } => {
                    last.insert((agent, action), allowed);
                    cache.store(key(agent, action), allowed);
                }
                Op::Lookup { agent, action } => {
                    if let Some(found) = cache.lookup(&key(agent, action)) {
                        prop_assert_eq!(Some(&found), last.get(&(agent, action)));
                    }
                }
                _ => apply(&cache, &clock, op),
            }
        }
    }

    /// Property: After invalidating an agent none of its keys remain
    #[test]
    fn prop_invalidate_agent_removes_only_that_agent(
        stores in prop::collection::vec((0u8..6, 0u8..4), 1..40),
        target in 0u8..6
    ) {
        let (cache, _clock) = new_cache(128, 60);
        for &(agent, action) in &stores {
            cache.store(key(agent, action), true);
        }
        let before: HashSet<AuthorizationKey> = cache.keys().into_iter().collect();
        let target_id = format!("agent-{target}");

        let removed = cache.invalidate(&target_id, None);

        let after: HashSet<AuthorizationKey> = cache.keys().into_iter().collect();
        prop_assert!(after.iter().all(|k| k.agent_id() != target_id));
        prop_assert_eq!(before.len() - after.len(), removed);
        prop_assert!(after.is_subset(&before));
    }

    /// Property: Valid components always format as exactly one separator
    #[test]
    fn prop_key_format_round_trips(
        agent in "[a-zA-Z0-9_-]{1,24}",
        action in "[a-zA-Z0-9_.-]{1,24}"
    ) {
        let key = AuthorizationKey::new(agent.clone(), action.clone()).unwrap();
        let text = key.to_string();

        prop_assert_eq!(text.matches(':').count(), 1);
        prop_assert_eq!(&text, &format!("{agent}:{action}"));
        let parsed: AuthorizationKey = text.parse().unwrap();
        prop_assert_eq!(parsed, key);
    }

    /// Property: Components containing the separator are rejected
    #[test]
    fn prop_separator_in_component_rejected(
        prefix in "[a-z]{0,8}",
        suffix in "[a-z]{0,8}"
    ) {
        let bad = format!("{prefix}:{suffix}");
        prop_assert!(AuthorizationKey::new(bad.clone(), "run").is_err());
        prop_assert!(AuthorizationKey::new("a1", bad).is_err());
    }
}
