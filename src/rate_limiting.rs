// ABOUTME: Fixed-window rate limiter keyed by identifier with pluggable counting stores
// ABOUTME: Provides an in-process DashMap store and a Redis sorted-set store for shared deployments
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Rate Limiting
//!
//! Each identifier (for example `login:alice@example.com`) owns an ordered list of
//! request timestamps. A check discards timestamps older than the window, denies
//! without recording when the remaining count has reached the limit, and otherwise
//! records the current time and allows the request.
//!
//! Counting state lives behind [`RateLimitStore`] so a single process can use the
//! in-memory store while multi-instance deployments share a Redis store.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use redis::aio::ConnectionManager;
use redis::{Client, Script};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{RateLimitBackend, RateLimitConfig};
use crate::constants::rate_limits::REDIS_KEY_PREFIX;
use crate::errors::{AppError, AppResult};

/// Outcome of a single rate-limit check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Maximum requests in the window
    pub limit: u32,
    /// Requests left in the window after this check
    pub remaining: u32,
    /// Seconds until the oldest retained request leaves the window, when denied
    pub retry_after_secs: Option<u64>,
    /// When the oldest retained request leaves the window
    pub reset_at: Option<DateTime<Utc>>,
}

/// Counting store behind the rate limiter
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Prune, test, and conditionally record a request for `key` at `now`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached
    async fn check_and_record(
        &self,
        key: &str,
        max_requests: u32,
        window_secs: u64,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitDecision>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Forget identifiers with no request newer than `max_window_secs`,
    /// returning how many were dropped. Stores that expire keys on their own
    /// keep the default.
    fn evict_idle(&self, _max_window_secs: u64, _now: DateTime<Utc>) -> usize {
        0
    }
}

fn window_delta(window_secs: u64) -> TimeDelta {
    i64::try_from(window_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

fn retry_after(oldest: DateTime<Utc>, window: TimeDelta, now: DateTime<Utc>) -> (u64, DateTime<Utc>) {
    let reset_at = oldest.checked_add_signed(window).unwrap_or(now);
    let millis = (reset_at - now).num_milliseconds().max(0);
    // Round up to whole seconds
    let secs = u64::try_from((millis + 999) / 1000).unwrap_or(0).max(1);
    (secs, reset_at)
}

/// Process-local store; state is lost on restart
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    buckets: DashMap<String, VecDeque<DateTime<Utc>>>,
}

impl InMemoryRateLimitStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked identifiers
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.buckets.len()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_record(
        &self,
        key: &str,
        max_requests: u32,
        window_secs: u64,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitDecision> {
        let window = window_delta(window_secs);
        let cutoff = now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC);

        // The entry guard holds the shard lock for this key until the decision is made
        let mut bucket = self.buckets.entry(key.to_owned()).or_default();
        bucket.retain(|ts| *ts > cutoff);

        let count = u32::try_from(bucket.len()).unwrap_or(u32::MAX);
        if count >= max_requests {
            let (secs, reset_at) = bucket
                .front()
                .map_or((1, now), |oldest| retry_after(*oldest, window, now));
            return Ok(RateLimitDecision {
                allowed: false,
                limit: max_requests,
                remaining: 0,
                retry_after_secs: Some(secs),
                reset_at: Some(reset_at),
            });
        }

        bucket.push_back(now);
        let reset_at = bucket.front().and_then(|oldest| oldest.checked_add_signed(window));
        Ok(RateLimitDecision {
            allowed: true,
            limit: max_requests,
            remaining: max_requests - count - 1,
            retry_after_secs: None,
            reset_at,
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn evict_idle(&self, max_window_secs: u64, now: DateTime<Utc>) -> usize {
        let cutoff = now
            .checked_sub_signed(window_delta(max_window_secs))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let before = self.buckets.len();
        self.buckets
            .retain(|_, timestamps| timestamps.back().is_some_and(|newest| *newest > cutoff));
        before.saturating_sub(self.buckets.len())
    }
}

/// Prune, count, and conditionally add in one atomic step.
/// Returns `{allowed, count_after, oldest_score_ms}`.
const SLIDING_WINDOW_SCRIPT: &str = r"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
local max = tonumber(ARGV[3])
local member = ARGV[4]

redis.call('ZREMRANGEBYSCORE', key, '-inf', now - window)
local count = redis.call('ZCARD', key)
local allowed = 0
if count < max then
  redis.call('ZADD', key, now, member)
  count = count + 1
  allowed = 1
end
redis.call('PEXPIRE', key, window)

local oldest = redis.call('ZRANGE', key, 0, 0, 'WITHSCORES')
local oldest_score = now
if oldest[2] then
  oldest_score = tonumber(oldest[2])
end
return {allowed, count, oldest_score}
";

/// Redis-backed store shared across server instances
#[derive(Clone)]
pub struct RedisRateLimitStore {
    connection: ConnectionManager,
    script: Arc<Script>,
}

impl RedisRateLimitStore {
    /// Connect to Redis
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the initial connection fails
    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| AppError::config(format!("Invalid REDIS_URL: {e}")))?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::external_service("redis", e.to_string()))?;
        Ok(Self {
            connection,
            script: Arc::new(Script::new(SLIDING_WINDOW_SCRIPT)),
        })
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn check_and_record(
        &self,
        key: &str,
        max_requests: u32,
        window_secs: u64,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitDecision> {
        let window_ms = window_secs.saturating_mul(1000);
        let now_ms = now.timestamp_millis();
        let member = format!("{now_ms}-{}", Uuid::new_v4());
        let mut connection = self.connection.clone();

        let (allowed, count, oldest_ms): (i64, i64, i64) = self
            .script
            .key(format!("{REDIS_KEY_PREFIX}{key}"))
            .arg(now_ms)
            .arg(window_ms)
            .arg(max_requests)
            .arg(member)
            .invoke_async(&mut connection)
            .await
            .map_err(|e| AppError::external_service("redis", e.to_string()))?;

        let window = window_delta(window_secs);
        let oldest = DateTime::from_timestamp_millis(oldest_ms).unwrap_or(now);
        let count = u32::try_from(count).unwrap_or(u32::MAX);

        if allowed == 1 {
            Ok(RateLimitDecision {
                allowed: true,
                limit: max_requests,
                remaining: max_requests.saturating_sub(count),
                retry_after_secs: None,
                reset_at: oldest.checked_add_signed(window),
            })
        } else {
            let (secs, reset_at) = retry_after(oldest, window, now);
            Ok(RateLimitDecision {
                allowed: false,
                limit: max_requests,
                remaining: 0,
                retry_after_secs: Some(secs),
                reset_at: Some(reset_at),
            })
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// Rate limiter facade shared through server resources
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    /// Wrap an existing store
    #[must_use]
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// Limiter backed by a fresh in-memory store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRateLimitStore::new()))
    }

    /// Build the limiter selected by configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis backend is selected and cannot be reached
    pub async fn from_config(config: &RateLimitConfig) -> AppResult<Self> {
        match (config.backend, config.redis_url.as_deref()) {
            (RateLimitBackend::Redis, Some(url)) => {
                let store = RedisRateLimitStore::connect(url).await?;
                Ok(Self::new(Arc::new(store)))
            }
            (RateLimitBackend::Redis, None) => Err(AppError::config(
                "RATE_LIMIT_BACKEND=redis requires REDIS_URL",
            )),
            (RateLimitBackend::Memory, _) => Ok(Self::in_memory()),
        }
    }

    /// Whether a request for `identifier` is allowed, recording it if so
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached
    pub async fn check(
        &self,
        identifier: &str,
        max_requests: u32,
        window_secs: u64,
    ) -> AppResult<bool> {
        Ok(self
            .check_detailed(identifier, max_requests, window_secs)
            .await?
            .allowed)
    }

    /// Full decision for a request at the current time
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached
    pub async fn check_detailed(
        &self,
        identifier: &str,
        max_requests: u32,
        window_secs: u64,
    ) -> AppResult<RateLimitDecision> {
        self.check_at(identifier, max_requests, window_secs, Utc::now())
            .await
    }

    /// Full decision for a request at an explicit time
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached
    pub async fn check_at(
        &self,
        identifier: &str,
        max_requests: u32,
        window_secs: u64,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitDecision> {
        let decision = self
            .store
            .check_and_record(identifier, max_requests, window_secs, now)
            .await?;

        if decision.allowed {
            debug!(
                identifier,
                remaining = decision.remaining,
                backend = self.store.backend_name(),
                "Rate limit check passed"
            );
        } else {
            warn!(
                identifier,
                limit = max_requests,
                window_secs,
                retry_after_secs = ?decision.retry_after_secs,
                backend = self.store.backend_name(),
                "Rate limit exceeded"
            );
        }
        Ok(decision)
    }

    /// Backend name for logs and health output
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Drop identifiers idle for longer than `max_window_secs`
    pub fn evict_idle(&self, max_window_secs: u64, now: DateTime<Utc>) -> usize {
        self.store.evict_idle(max_window_secs, now)
    }

    /// Run [`RateLimiter::evict_idle`] every `period` until the task is aborted
    ///
    /// `max_window_secs` must be at least the longest window any caller checks
    /// with, otherwise live buckets are forgotten early.
    #[must_use]
    pub fn spawn_idle_eviction(&self, max_window_secs: u64, period: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let evicted = limiter.evict_idle(max_window_secs, Utc::now());
                if evicted > 0 {
                    debug!(
                        evicted,
                        backend = limiter.backend_name(),
                        "Evicted idle rate limit buckets"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn test_nth_plus_one_request_is_denied() {
        let limiter = RateLimiter::in_memory();
        for i in 0..3 {
            let decision = limiter.check_at("register:1.2.3.4", 3, 3600, at(i)).await.unwrap();
            assert!(decision.allowed, "request {i} should be allowed");
        }
        let denied = limiter.check_at("register:1.2.3.4", 3, 3600, at(10)).await.unwrap();
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.retry_after_secs, Some(3590));
    }

    #[tokio::test]
    async fn test_allowed_again_after_oldest_ages_out() {
        let limiter = RateLimiter::in_memory();
        assert!(limiter.check_at("k", 2, 60, at(0)).await.unwrap().allowed);
        assert!(limiter.check_at("k", 2, 60, at(30)).await.unwrap().allowed);
        assert!(!limiter.check_at("k", 2, 60, at(59)).await.unwrap().allowed);

        // The first request is exactly one window old and no longer counts
        assert!(limiter.check_at("k", 2, 60, at(60)).await.unwrap().allowed);
        assert!(!limiter.check_at("k", 2, 60, at(61)).await.unwrap().allowed);
    }

    #[tokio::test]
    async fn test_denied_requests_are_not_recorded() {
        let store = Arc::new(InMemoryRateLimitStore::new());
        let limiter = RateLimiter::new(store.clone());
        assert!(limiter.check_at("k", 1, 10, at(0)).await.unwrap().allowed);
        for i in 1..5 {
            assert!(!limiter.check_at("k", 1, 10, at(i)).await.unwrap().allowed);
        }
        // Only the single allowed request counts, so the window reopens at t=10
        assert!(limiter.check_at("k", 1, 10, at(10)).await.unwrap().allowed);
    }

    #[tokio::test]
    async fn test_identifiers_are_independent() {
        let limiter = RateLimiter::in_memory();
        assert!(limiter.check("login:a@x.test", 1, 900).await.unwrap());
        assert!(!limiter.check("login:a@x.test", 1, 900).await.unwrap());
        assert!(limiter.check("login:b@x.test", 1, 900).await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_limit_always_denies() {
        let limiter = RateLimiter::in_memory();
        assert!(!limiter.check("k", 0, 60).await.unwrap());
    }

    #[tokio::test]
    async fn test_evict_idle_drops_stale_buckets() {
        let store = InMemoryRateLimitStore::new();
        store.check_and_record("old", 5, 60, at(0)).await.unwrap();
        store.check_and_record("fresh", 5, 60, at(500)).await.unwrap();
        assert_eq!(store.evict_idle(60, at(520)), 1);
        assert_eq!(store.tracked_keys(), 1);
    }

    #[tokio::test]
    async fn test_limiter_evicts_through_store() {
        let store = Arc::new(InMemoryRateLimitStore::new());
        let limiter = RateLimiter::new(store.clone());
        limiter.check_at("login:idle@x.test", 5, 900, at(0)).await.unwrap();
        limiter.check_at("login:busy@x.test", 5, 900, at(800)).await.unwrap();

        assert_eq!(limiter.evict_idle(900, at(899)), 0);
        assert_eq!(limiter.evict_idle(900, at(1000)), 1);
        assert_eq!(store.tracked_keys(), 1);

        // A forgotten identifier starts over with a full allowance
        let fresh = limiter.check_at("login:idle@x.test", 5, 900, at(1000)).await.unwrap();
        assert_eq!(fresh.remaining, 4);
    }

    #[tokio::test]
    async fn test_background_eviction_prunes_idle_buckets() {
        let store = Arc::new(InMemoryRateLimitStore::new());
        let limiter = RateLimiter::new(store.clone());
        for n in 0..20 {
            limiter
                .check_at(&format!("register:10.0.0.{n}"), 3, 60, at(0))
                .await
                .unwrap();
        }
        assert_eq!(store.tracked_keys(), 20);

        let sweeper = limiter.spawn_idle_eviction(60, Duration::from_millis(10));
        for _ in 0..100 {
            if store.tracked_keys() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        sweeper.abort();
        assert_eq!(store.tracked_keys(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_checks_never_exceed_limit() {
        let limiter = RateLimiter::in_memory();
        let now = at(0);
        let handles: Vec<_> = (0..50)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.check_at("shared", 10, 60, now).await })
            })
            .collect();

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().allowed {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 10);
    }
}
