//! Client-side query cache with staleness, retry, and de-duplication.
//!
//! The cache is a plain struct keyed by query signature
//! (`endpoint?params`), holding JSON payloads with timestamps. All policy
//! decisions (fresh vs stale, eviction, backoff delays, in-flight
//! bookkeeping) are synchronous and timestamp-parameterized so they can be
//! unit-tested off WASM; `run_query`/`run_mutation` are the browser-side
//! drivers that put the policy behind real fetches.
//!
//! INVARIANT
//! =========
//! At most one request is in flight per distinct key. `begin` admits a
//! single leader; concurrent callers for the same key wait and read the
//! leader's result from the cache.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde_json::Value;

use crate::net::http::ApiError;

/// Exponential-backoff retry policy: `delay = min(base * 2^attempt, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (zero-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> u64 {
        let factor = 1_u64 << attempt.min(31);
        self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms)
    }
}

/// Cache policy with documented defaults.
#[derive(Clone, Copy, Debug)]
pub struct QueryConfig {
    /// How long a cached payload is served without refetching.
    pub stale_time: Duration,
    /// How long an unused entry is kept before eviction.
    pub cache_retention: Duration,
    /// Whether regaining window focus marks everything stale.
    pub refetch_on_focus: bool,
    /// Retry policy for reads.
    pub retry: RetryPolicy,
    /// Retry policy for writes: a single retry, since mutations are not
    /// safely idempotent.
    pub mutation_retry: RetryPolicy,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(30),
            cache_retention: Duration::from_secs(5 * 60),
            refetch_on_focus: true,
            retry: RetryPolicy { attempts: 3, base_delay_ms: 1_000, max_delay_ms: 30_000 },
            mutation_retry: RetryPolicy { attempts: 1, base_delay_ms: 1_000, max_delay_ms: 1_000 },
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: Value,
    inserted_at: u64,
    last_used: u64,
}

/// Outcome of a cache lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Within `stale_time`: serve without refetching.
    Fresh(Value),
    /// Usable, but a background refetch is due.
    Stale(Value),
    Miss,
}

/// Process-wide query cache, provided via context.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    config: QueryConfig,
    entries: HashMap<String, CacheEntry>,
    in_flight: HashSet<String>,
    failures: HashMap<String, ApiError>,
}

impl QueryCache {
    #[must_use]
    pub fn new(config: QueryConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            in_flight: HashSet::new(),
            failures: HashMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Build the signature for an endpoint and its query parameters.
    /// Parameter order is part of the key; callers pass them sorted.
    #[must_use]
    pub fn query_key(endpoint: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return endpoint.to_owned();
        }
        let mut key = String::from(endpoint);
        for (i, (name, value)) in params.iter().enumerate() {
            key.push(if i == 0 { '?' } else { '&' });
            key.push_str(name);
            key.push('=');
            key.push_str(value);
        }
        key
    }

    /// Look up a key at time `now` (milliseconds), refreshing its
    /// last-used mark.
    pub fn lookup(&mut self, key: &str, now: u64) -> Lookup {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used = now;
                let age = now.saturating_sub(entry.inserted_at);
                if age < stale_ms(&self.config) {
                    Lookup::Fresh(entry.value.clone())
                } else {
                    Lookup::Stale(entry.value.clone())
                }
            }
            None => Lookup::Miss,
        }
    }

    /// Store a fetched payload. Clears any failure recorded for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value, now: u64) {
        let key = key.into();
        self.failures.remove(&key);
        self.entries.insert(key, CacheEntry { value, inserted_at: now, last_used: now });
    }

    /// Claim the in-flight slot for `key`. Returns `false` when another
    /// caller already owns it; that caller's result must be awaited instead
    /// of issuing a second request. A fresh claim starts a new attempt, so
    /// the previous recorded failure is dropped.
    pub fn begin(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.in_flight.insert(key.clone()) {
            self.failures.remove(&key);
            true
        } else {
            false
        }
    }

    /// Release the in-flight slot.
    pub fn finish(&mut self, key: &str) {
        self.in_flight.remove(key);
    }

    /// Record why the in-flight request for `key` failed, so deduplicated
    /// waiters report the leader's actual error instead of inventing one.
    pub fn record_failure(&mut self, key: impl Into<String>, err: ApiError) {
        self.failures.insert(key.into(), err);
    }

    /// The failure recorded by the last attempt for `key`, if any.
    #[must_use]
    pub fn failure(&self, key: &str) -> Option<ApiError> {
        self.failures.get(key).cloned()
    }

    #[must_use]
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight.contains(key)
    }

    /// Drop every cached entry of a resource family after a mutation, so
    /// the next read refetches. The family is the endpoint prefix
    /// (e.g. `/api/v1/itineraires`).
    pub fn invalidate_family(&mut self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// Evict entries unused for longer than `cache_retention`.
    pub fn evict_expired(&mut self, now: u64) {
        let retention = retention_ms(&self.config);
        self.entries.retain(|_, entry| now.saturating_sub(entry.last_used) <= retention);
    }

    /// Mark everything stale (window regained focus).
    pub fn mark_all_stale(&mut self) {
        for entry in self.entries.values_mut() {
            entry.inserted_at = 0;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn stale_ms(config: &QueryConfig) -> u64 {
    u64::try_from(config.stale_time.as_millis()).unwrap_or(u64::MAX)
}

fn retention_ms(config: &QueryConfig) -> u64 {
    u64::try_from(config.cache_retention.as_millis()).unwrap_or(u64::MAX)
}

/// What the driver does with a lookup outcome, given whether this caller
/// was admitted as the refetch leader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plan {
    /// Serve the cached payload; no request leaves for this caller.
    Serve(Value),
    /// Serve the cached payload now and refresh it in the background.
    ServeAndRefresh(Value),
    /// Another caller owns the refetch; await its result.
    AwaitLeader,
    /// Nothing usable cached; fetch in the foreground.
    Fetch,
}

/// Decide the driver's course after a lookup. A stale payload is served
/// immediately; its refresh never blocks the caller.
#[must_use]
pub fn plan(lookup: Lookup, admitted: bool) -> Plan {
    match (lookup, admitted) {
        (Lookup::Fresh(value), _) | (Lookup::Stale(value), false) => Plan::Serve(value),
        (Lookup::Stale(value), true) => Plan::ServeAndRefresh(value),
        (Lookup::Miss, true) => Plan::Fetch,
        (Lookup::Miss, false) => Plan::AwaitLeader,
    }
}

#[cfg(feature = "hydrate")]
pub use driver::{run_mutation, run_query};

#[cfg(feature = "hydrate")]
mod driver {
    use std::future::Future;
    use std::time::Duration;

    use leptos::prelude::{RwSignal, Update, WithUntracked};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use super::{Lookup, Plan, QueryCache, RetryPolicy, plan};
    use crate::net::http::ApiError;

    fn now_ms() -> u64 {
        js_sys::Date::now() as u64
    }

    async fn sleep_ms(ms: u64) {
        gloo_timers::future::sleep(Duration::from_millis(ms)).await;
    }

    /// How often a deduplicated caller polls for the leader's result.
    const WAIT_POLL_MS: u64 = 50;
    /// Upper bound on waiting for the leader (covers its full retry budget).
    const WAIT_POLL_LIMIT: u32 = 2_400;

    /// Run a read through the cache: serve fresh and stale entries without
    /// blocking (stale ones trigger a background refresh), deduplicate
    /// concurrent callers, retry retryable failures with exponential
    /// backoff, and fill the cache on success.
    pub async fn run_query<T, F, Fut>(
        cache: RwSignal<QueryCache>,
        key: String,
        fetch: F,
    ) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let now = now_ms();
        let (lookup, admitted, policy) = cache
            .try_update(|c| {
                c.evict_expired(now);
                let lookup = c.lookup(&key, now);
                let admitted =
                    !matches!(lookup, Lookup::Fresh(_)) && c.begin(key.clone());
                (lookup, admitted, c.config().retry)
            })
            .unwrap_or((Lookup::Miss, false, RetryPolicy {
                attempts: 0,
                base_delay_ms: 0,
                max_delay_ms: 0,
            }));

        match plan(lookup, admitted) {
            Plan::Serve(value) => match serde_json::from_value(value) {
                Ok(decoded) => Ok(decoded),
                Err(_) => wait_for_leader(cache, &key).await,
            },
            Plan::ServeAndRefresh(value) => match serde_json::from_value(value) {
                Ok(decoded) => {
                    leptos::task::spawn_local(async move {
                        if let Err(err) =
                            refetch_into_cache(cache, key, &fetch, policy).await
                        {
                            leptos::logging::warn!("background refresh failed: {err:?}");
                        }
                    });
                    Ok(decoded)
                }
                // Undecodable stale payload; this caller owns the slot, so
                // refetch in the foreground.
                Err(_) => refetch_into_cache(cache, key, &fetch, policy).await,
            },
            Plan::AwaitLeader => wait_for_leader(cache, &key).await,
            Plan::Fetch => refetch_into_cache(cache, key, &fetch, policy).await,
        }
    }

    /// Drive the fetch-with-retry and publish the outcome: success fills
    /// the cache, failure is recorded for deduplicated waiters. Releases
    /// the in-flight slot either way.
    async fn refetch_into_cache<T, F, Fut>(
        cache: RwSignal<QueryCache>,
        key: String,
        fetch: &F,
        policy: RetryPolicy,
    ) -> Result<T, ApiError>
    where
        T: Serialize,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let outcome = fetch_with_retry(fetch, policy).await;
        match &outcome {
            Ok(value) => {
                let json = serde_json::to_value(value).ok();
                let done = now_ms();
                cache.update(|c| {
                    if let Some(json) = json {
                        c.insert(key.clone(), json, done);
                    }
                    c.finish(&key);
                });
            }
            Err(err) => {
                let recorded = err.clone();
                cache.update(|c| {
                    c.record_failure(key.clone(), recorded);
                    c.finish(&key);
                });
            }
        }
        outcome
    }

    /// Run a write with the (deliberately short) mutation retry policy and
    /// invalidate the resource family on success.
    pub async fn run_mutation<T, F, Fut>(
        cache: RwSignal<QueryCache>,
        family: &str,
        mutate: F,
    ) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let policy = cache
            .try_with_untracked(|c| c.config().mutation_retry)
            .unwrap_or(RetryPolicy { attempts: 0, base_delay_ms: 0, max_delay_ms: 0 });

        let outcome = fetch_with_retry(&mutate, policy).await;
        if outcome.is_ok() {
            let family = family.to_owned();
            cache.update(move |c| c.invalidate_family(&family));
        }
        outcome
    }

    async fn fetch_with_retry<T, F, Fut>(fetch: &F, policy: RetryPolicy) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;
        loop {
            match fetch().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < policy.attempts => {
                    sleep_ms(policy.delay_for(attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// A concurrent caller parks here until the leader releases the
    /// in-flight slot, then reads the leader's result from the cache.
    async fn wait_for_leader<T: DeserializeOwned>(
        cache: RwSignal<QueryCache>,
        key: &str,
    ) -> Result<T, ApiError> {
        for _ in 0..WAIT_POLL_LIMIT {
            sleep_ms(WAIT_POLL_MS).await;
            let busy = cache
                .try_with_untracked(|c| c.is_in_flight(key))
                .unwrap_or(false);
            if busy {
                continue;
            }
            // The leader's failure is reported as-is, not as a made-up
            // connectivity error.
            if let Some(err) = cache.try_with_untracked(|c| c.failure(key)).unwrap_or(None) {
                return Err(err);
            }
            let now = now_ms();
            let lookup = cache
                .try_update(|c| c.lookup(key, now))
                .unwrap_or(Lookup::Miss);
            return match lookup {
                Lookup::Fresh(value) | Lookup::Stale(value) => {
                    serde_json::from_value(value).map_err(|_| ApiError::Network)
                }
                Lookup::Miss => Err(ApiError::Network),
            };
        }
        Err(ApiError::Network)
    }
}
