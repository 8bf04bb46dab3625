//! Integration tests for rate limiting middleware.
//!
//! These tests verify the HTTP-level behavior of rate limiting,
//! including 429 responses and how clients are told apart.

mod common;

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{TestAppBuilder, get_request};

/// A mentors request arriving from `peer`, optionally carrying a forwarded
/// client address.
fn mentors_request(peer: &str, forwarded_for: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/api/mentors");
    if let Some(ip) = forwarded_for {
        builder = builder.header("X-Forwarded-For", ip);
    }
    let mut request = builder.body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
    request
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    let app = TestAppBuilder::new().rate_limit(3).build().router;

    for i in 1..=3 {
        let response = app
            .clone()
            .oneshot(mentors_request("203.0.113.7:40000", None))
            .await
            .unwrap();
        assert_ne!(
            response.status(),
            StatusCode::TOO_MANY_REQUESTS,
            "request {} is within quota",
            i
        );
    }

    let response = app
        .clone()
        .oneshot(mentors_request("203.0.113.7:40001", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Rate limit exceeded")
    );
    assert_eq!(json["retry_after_seconds"], 60);
}

#[tokio::test]
async fn test_rate_limiting_health_endpoint_bypassed() {
    let app = TestAppBuilder::new().rate_limit(1).build().router;

    for _ in 0..10 {
        let response = app.clone().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_rate_limiting_per_client_isolation() {
    let app = TestAppBuilder::new().rate_limit(1).build().router;

    let response = app
        .clone()
        .oneshot(mentors_request("198.51.100.1:5000", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(mentors_request("198.51.100.1:5001", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different peer still has its own quota
    let response = app
        .clone()
        .oneshot(mentors_request("198.51.100.2:5000", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rotating_forwarded_header_does_not_reset_quota() {
    let app = TestAppBuilder::new().rate_limit(1).build().router;

    let response = app
        .clone()
        .oneshot(mentors_request("192.0.2.50:6000", Some("203.0.113.1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for forged in ["203.0.113.2", "203.0.113.3", "2001:db8::1"] {
        let response = app
            .clone()
            .oneshot(mentors_request("192.0.2.50:6000", Some(forged)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS, "{forged}");
    }
}

#[tokio::test]
async fn test_forwarded_header_identifies_clients_behind_proxy() {
    let app = TestAppBuilder::new().rate_limit(1).trust_proxy().build().router;

    // Every request arrives from the proxy itself
    let response = app
        .clone()
        .oneshot(mentors_request("10.0.0.1:443", Some("203.0.113.1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(mentors_request("10.0.0.1:443", Some("203.0.113.1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app
        .clone()
        .oneshot(mentors_request("10.0.0.1:443", Some("203.0.113.2")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
