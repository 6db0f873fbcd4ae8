//! Rate limiting middleware.
//!
//! Applies the domain rule table per remote server. The bucket key and the
//! (requests, window) rules come from the domain layer; the actual limiting
//! algorithm is governor's.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
    time::Duration,
};

use crate::app::AppState;
use crate::extractors::RemoteServerAuth;
use domain::services::rate_limit::{RateLimitRule, RateLimitedRemoteServer};

/// Type alias for the limiter tracking one bucket.
type BucketLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across all requests.
///
/// One governor limiter exists per (bucket key, rule index); buckets are
/// created lazily on first use.
#[derive(Default)]
pub struct RateLimiterState {
    limiters: RwLock<HashMap<String, Arc<BucketLimiter>>>,
}

impl RateLimiterState {
    /// Create an empty rate limiter state.
    pub fn new() -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the limiter for a bucket under the given rule.
    fn get_or_create_limiter(&self, bucket: &str, rule: RateLimitRule) -> Arc<BucketLimiter> {
        // First try to get an existing limiter with the read lock
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(bucket) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();

        // Double-check in case another thread created it
        if let Some(limiter) = limiters.get(bucket) {
            return limiter.clone();
        }

        let (max_requests, window_secs) = rule;
        let max = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::new(1).unwrap());
        let quota = Quota::with_period(Duration::from_secs(window_secs) / max_requests.max(1))
            .unwrap_or_else(|| Quota::per_minute(max))
            .allow_burst(max);

        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(bucket.to_string(), limiter.clone());
        limiter
    }

    /// Check a bucket against an explicit rule set.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds.
    pub fn check_bucket(&self, key: &str, rules: &[RateLimitRule]) -> Result<(), u64> {
        for (index, rule) in rules.iter().enumerate() {
            let bucket = format!("{}#{}", key, index);
            let limiter = self.get_or_create_limiter(&bucket, *rule);

            if let Err(not_until) = limiter.check() {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                // Minimum 1 second
                return Err(wait_time.as_secs().max(1));
            }
        }
        Ok(())
    }

    /// Check a request from the given rate-limited identity.
    pub fn check(&self, limited: &RateLimitedRemoteServer) -> Result<(), u64> {
        self.check_bucket(&limited.key(), limited.rules())
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("active_limiters", &self.limiters.read().unwrap().len())
            .finish()
    }
}

/// Middleware that applies per-remote-server rate limiting.
///
/// This middleware must run AFTER authentication so that the server identity
/// is available in request extensions.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // If no auth info, skip rate limiting (request will fail auth anyway)
    let auth = match req.extensions().get::<RemoteServerAuth>() {
        Some(auth) => auth.clone(),
        None => return next.run(req).await,
    };

    if let Some(ref rate_limiter) = state.rate_limiter {
        let limited = RateLimitedRemoteServer::for_api(auth.server.uuid);
        if let Err(retry_after) = rate_limiter.check(&limited) {
            return rate_limited_response(&limited, retry_after);
        }
    }

    next.run(req).await
}

/// Create a rate limited response with proper headers and body.
fn rate_limited_response(limited: &RateLimitedRemoteServer, retry_after: u64) -> Response {
    let (limit, window) = limited.rules().first().copied().unwrap_or((0, 0));
    let body = json!({
        "error": "rate_limit_exceeded",
        "message": format!("Rate limit of {} requests per {} seconds exceeded", limit, window),
        "retry_after": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    response.headers_mut().insert(
        header::RETRY_AFTER,
        retry_after.to_string().parse().unwrap(),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_rate_limiter_allows_requests() {
        let state = RateLimiterState::new();
        let limited = RateLimitedRemoteServer::for_api(Uuid::new_v4());

        assert!(state.check(&limited).is_ok());
    }

    #[test]
    fn test_rate_limiter_no_rules_never_limited() {
        let state = RateLimiterState::new();

        for _ in 0..100 {
            assert!(state.check_bucket("unruled", &[]).is_ok());
        }
    }

    #[test]
    fn test_rate_limiter_exhaustion() {
        let state = RateLimiterState::new();
        let rules = [(1u32, 60u64)];

        assert!(state.check_bucket("bucket-a", &rules).is_ok());

        let result = state.check_bucket("bucket-a", &rules);
        assert!(result.is_err());
        // Retry-after should be at least 1 second
        assert!(result.unwrap_err() >= 1);
    }

    #[test]
    fn test_rate_limiter_buckets_independent() {
        let state = RateLimiterState::new();
        let rules = [(1u32, 60u64)];

        assert!(state.check_bucket("bucket-a", &rules).is_ok());
        assert!(state.check_bucket("bucket-b", &rules).is_ok());

        assert!(state.check_bucket("bucket-a", &rules).is_err());
        assert!(state.check_bucket("bucket-b", &rules).is_err());
    }

    #[test]
    fn test_rate_limiter_multiple_rules_most_restrictive_wins() {
        let state = RateLimiterState::new();
        let rules = [(2u32, 60u64), (5u32, 3600u64)];

        assert!(state.check_bucket("bucket-c", &rules).is_ok());
        assert!(state.check_bucket("bucket-c", &rules).is_ok());
        assert!(state.check_bucket("bucket-c", &rules).is_err());
    }

    #[test]
    fn test_rate_limiter_servers_independent() {
        let state = RateLimiterState::new();
        let a = RateLimitedRemoteServer::for_api(Uuid::new_v4());
        let b = RateLimitedRemoteServer::for_api(Uuid::new_v4());

        assert!(state.check(&a).is_ok());
        assert!(state.check(&b).is_ok());
    }

    #[test]
    fn test_get_or_create_idempotent() {
        let state = RateLimiterState::new();
        let rule = (10u32, 60u64);

        let limiter1 = state.get_or_create_limiter("same", rule);
        let limiter2 = state.get_or_create_limiter("same", rule);

        assert!(Arc::ptr_eq(&limiter1, &limiter2));
    }

    #[test]
    fn test_rate_limiter_state_debug() {
        let state = RateLimiterState::new();
        state.check_bucket("x", &[(10, 60)]).unwrap();

        let debug = format!("{:?}", state);
        assert!(debug.contains("RateLimiterState"));
        assert!(debug.contains("active_limiters"));
    }

    #[test]
    fn test_rate_limited_response_format() {
        let limited = RateLimitedRemoteServer::for_api(Uuid::new_v4());
        let response = rate_limited_response(&limited, 60);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "60");
    }
}
