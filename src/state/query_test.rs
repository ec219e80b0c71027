use super::*;
use serde_json::json;

const MINUTE_MS: u64 = 60 * 1_000;

fn cache() -> QueryCache {
    QueryCache::new(QueryConfig::default())
}

// =============================================================
// Query keys
// =============================================================

#[test]
fn query_key_without_params_is_the_endpoint() {
    assert_eq!(QueryCache::query_key("/api/v1/itineraires", &[]), "/api/v1/itineraires");
}

#[test]
fn query_key_appends_params_in_order() {
    let key = QueryCache::query_key("/api/v1/itineraires", &[("page", "2"), ("search", "LSH")]);
    assert_eq!(key, "/api/v1/itineraires?page=2&search=LSH");
}

// =============================================================
// Staleness
// =============================================================

#[test]
fn lookup_miss_on_empty_cache() {
    let mut c = cache();
    assert_eq!(c.lookup("/api/v1/itineraires", 0), Lookup::Miss);
}

#[test]
fn entry_is_fresh_within_stale_time() {
    let mut c = cache();
    c.insert("/api/v1/itineraires", json!([1, 2]), 1_000);
    // 29s later: still inside the 30s stale window.
    assert_eq!(c.lookup("/api/v1/itineraires", 30_000), Lookup::Fresh(json!([1, 2])));
}

#[test]
fn entry_goes_stale_after_stale_time() {
    let mut c = cache();
    c.insert("/api/v1/itineraires", json!([1]), 0);
    assert_eq!(c.lookup("/api/v1/itineraires", 30_000), Lookup::Stale(json!([1])));
}

#[test]
fn mark_all_stale_forces_refetch_eligibility() {
    let mut c = cache();
    c.insert("/api/v1/itineraires", json!([]), 1_000_000);
    c.mark_all_stale();
    assert_eq!(c.lookup("/api/v1/itineraires", 1_000_001), Lookup::Stale(json!([])));
}

// =============================================================
// Eviction
// =============================================================

#[test]
fn unused_entries_are_evicted_after_retention() {
    let mut c = cache();
    c.insert("/api/v1/itineraires/stats", json!({"total": 3}), 0);
    c.evict_expired(5 * MINUTE_MS + 1);
    assert!(c.is_empty());
}

#[test]
fn recently_used_entries_survive_eviction() {
    let mut c = cache();
    c.insert("/api/v1/itineraires/stats", json!({"total": 3}), 0);
    // A stale lookup still counts as use.
    let _ = c.lookup("/api/v1/itineraires/stats", 4 * MINUTE_MS);
    c.evict_expired(8 * MINUTE_MS);
    assert_eq!(c.len(), 1);
}

// =============================================================
// De-duplication
// =============================================================

#[test]
fn second_begin_for_same_key_is_rejected() {
    let mut c = cache();
    assert!(c.begin("/api/v1/itineraires"));
    assert!(!c.begin("/api/v1/itineraires"));
    assert!(c.is_in_flight("/api/v1/itineraires"));
}

#[test]
fn distinct_keys_fly_independently() {
    let mut c = cache();
    assert!(c.begin("/api/v1/itineraires"));
    assert!(c.begin("/api/v1/itineraires/stats"));
}

#[test]
fn finish_releases_the_slot() {
    let mut c = cache();
    assert!(c.begin("/api/v1/itineraires"));
    c.finish("/api/v1/itineraires");
    assert!(!c.is_in_flight("/api/v1/itineraires"));
    assert!(c.begin("/api/v1/itineraires"));
}

// =============================================================
// Serve plan
// =============================================================

#[test]
fn fresh_lookups_are_served_without_a_refetch() {
    assert_eq!(plan(Lookup::Fresh(json!([1])), false), Plan::Serve(json!([1])));
}

#[test]
fn stale_leader_serves_and_refreshes_in_background() {
    assert_eq!(plan(Lookup::Stale(json!([1])), true), Plan::ServeAndRefresh(json!([1])));
}

#[test]
fn stale_follower_serves_without_waiting() {
    // Someone else already owns the refetch; the stale payload is still
    // served immediately.
    assert_eq!(plan(Lookup::Stale(json!([1])), false), Plan::Serve(json!([1])));
}

#[test]
fn misses_fetch_or_await_the_leader() {
    assert_eq!(plan(Lookup::Miss, true), Plan::Fetch);
    assert_eq!(plan(Lookup::Miss, false), Plan::AwaitLeader);
}

// =============================================================
// Shared failure propagation
// =============================================================

#[test]
fn recorded_failure_is_readable_by_waiters() {
    let mut c = cache();
    assert!(c.begin("/api/v1/itineraires"));
    c.record_failure("/api/v1/itineraires", ApiError::NotFound);
    c.finish("/api/v1/itineraires");
    assert_eq!(c.failure("/api/v1/itineraires"), Some(ApiError::NotFound));
}

#[test]
fn new_attempt_clears_the_recorded_failure() {
    let mut c = cache();
    c.record_failure("/api/v1/itineraires", ApiError::Network);
    assert!(c.begin("/api/v1/itineraires"));
    assert_eq!(c.failure("/api/v1/itineraires"), None);
}

#[test]
fn successful_fill_clears_the_recorded_failure() {
    let mut c = cache();
    c.record_failure("/api/v1/itineraires", ApiError::Network);
    c.insert("/api/v1/itineraires", json!([1]), 0);
    assert_eq!(c.failure("/api/v1/itineraires"), None);
}

// =============================================================
// Invalidation
// =============================================================

#[test]
fn mutation_invalidates_the_whole_family() {
    let mut c = cache();
    c.insert("/api/v1/itineraires", json!([1]), 0);
    c.insert("/api/v1/itineraires?search=LSH", json!([2]), 0);
    c.insert("/api/v1/itineraires/stats", json!({"total": 1}), 0);
    c.insert("/api/v1/verify/LSH-25-SA000001", json!({"valide": true}), 0);

    c.invalidate_family("/api/v1/itineraires");

    assert_eq!(c.len(), 1);
    assert_eq!(
        c.lookup("/api/v1/verify/LSH-25-SA000001", 1),
        Lookup::Fresh(json!({"valide": true}))
    );
}

// =============================================================
// Retry policy
// =============================================================

#[test]
fn query_backoff_doubles_and_caps_at_30s() {
    let policy = QueryConfig::default().retry;
    assert_eq!(policy.delay_for(0), 1_000);
    assert_eq!(policy.delay_for(1), 2_000);
    assert_eq!(policy.delay_for(2), 4_000);
    assert_eq!(policy.delay_for(4), 16_000);
    assert_eq!(policy.delay_for(5), 30_000);
    assert_eq!(policy.delay_for(20), 30_000);
}

#[test]
fn mutation_policy_allows_a_single_flat_retry() {
    let policy = QueryConfig::default().mutation_retry;
    assert_eq!(policy.attempts, 1);
    assert_eq!(policy.delay_for(0), 1_000);
    // No growth beyond the cap even if something retried more.
    assert_eq!(policy.delay_for(3), 1_000);
}

#[test]
fn huge_attempt_numbers_do_not_overflow() {
    let policy = RetryPolicy { attempts: 64, base_delay_ms: 1_000, max_delay_ms: 30_000 };
    assert_eq!(policy.delay_for(63), 30_000);
}
