//! Rate limiting middleware using Governor.
//!
//! Implements per-client rate limiting with a token bucket algorithm.
//! Clients are identified by their peer address. Forwarding headers are only
//! honoured when the server sits behind a trusted reverse proxy.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;
use std::{
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
    time::Duration,
};

/// How often idle client buckets are dropped.
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

const ANONYMOUS: &str = "anonymous";

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// One bucket per client address
    limiter: DefaultKeyedRateLimiter<String>,
    /// Take the client address from `X-Forwarded-For` / `X-Real-IP`
    trust_forwarded: bool,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state.
    ///
    /// # Arguments
    /// * `requests` - Number of requests allowed per period (at least 1)
    /// * `period` - Time period for the quota
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let replenish = period / burst.get();
        let quota = Quota::with_period(replenish)
            .map(|q| q.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_minute(burst));

        Self {
            limiter: RateLimiter::keyed(quota),
            trust_forwarded: false,
        }
    }

    /// Honour forwarding headers set by a reverse proxy.
    pub fn trust_forwarded(mut self, trust: bool) -> Self {
        self.trust_forwarded = trust;
        self
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, key: &str) -> bool {
        self.limiter.check_key(&key.to_string()).is_ok()
    }

    /// Drops buckets that have fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of client buckets currently held.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    fn client_key(&self, request: &Request<Body>) -> String {
        if self.trust_forwarded {
            if let Some(ip) = forwarded_ip(request.headers()) {
                return ip.to_string();
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }
}

/// Client address reported by the reverse proxy, if it parses as an IP.
fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let parse = |name: &str, first_only: bool| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(|s| if first_only { s.split(',').next().unwrap_or(s) } else { s })
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    };

    parse("X-Forwarded-For", true).or_else(|| parse("X-Real-IP", false))
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<std::sync::Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let key = limiter.client_key(&request);

    if !limiter.check(&key) {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "retry_after_seconds": 60
            })),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn request_from(peer: &str, forwarded_for: Option<&'static str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/mentors");
        if let Some(value) = forwarded_for {
            builder = builder.header("X-Forwarded-For", value);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
        request
    }

    #[test]
    fn test_forwarded_ip_prefers_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Forwarded-For",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("X-Real-IP", HeaderValue::from_static("10.0.0.2"));

        assert_eq!(forwarded_ip(&headers), Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_forwarded_ip_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", HeaderValue::from_static("not-an-ip"));
        assert_eq!(forwarded_ip(&headers), None);

        headers.insert("X-Real-IP", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(forwarded_ip(&headers), Some("198.51.100.4".parse().unwrap()));
    }

    #[test]
    fn test_client_key_uses_peer_address_by_default() {
        let state = RateLimiterState::default();
        let request = request_from("192.0.2.10:51000", Some("203.0.113.7"));

        assert_eq!(state.client_key(&request), "192.0.2.10");
    }

    #[test]
    fn test_client_key_uses_forwarded_header_behind_proxy() {
        let state = RateLimiterState::default().trust_forwarded(true);
        let request = request_from("10.0.0.1:443", Some("203.0.113.7"));

        assert_eq!(state.client_key(&request), "203.0.113.7");
    }

    #[test]
    fn test_client_key_without_peer_is_anonymous() {
        let state = RateLimiterState::default();
        let request = Request::builder().body(Body::empty()).unwrap();

        assert_eq!(state.client_key(&request), ANONYMOUS);
    }

    #[test]
    fn test_quota_is_per_key() {
        let limiter = RateLimiterState::new(2, Duration::from_secs(60));

        assert!(limiter.check("a"));
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
        assert!(limiter.check("b"));
    }

    #[test]
    fn test_zero_requests_still_allows_one() {
        let limiter = RateLimiterState::new(0, Duration::from_secs(60));
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
    }

    #[test]
    fn test_prune_drops_refilled_buckets() {
        let limiter = RateLimiterState::new(1, Duration::from_millis(20));
        for i in 0..50 {
            assert!(limiter.check(&format!("198.51.100.{}", i)));
        }
        assert_eq!(limiter.tracked_clients(), 50);

        std::thread::sleep(Duration::from_millis(200));
        limiter.prune();

        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[test]
    fn test_prune_keeps_limited_clients() {
        let limiter = RateLimiterState::new(1, Duration::from_secs(60));
        assert!(limiter.check("a"));

        limiter.prune();

        assert_eq!(limiter.tracked_clients(), 1);
        assert!(!limiter.check("a"));
    }
}
