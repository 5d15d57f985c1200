//! Response hardening properties: the fixed header set must be present on
//! every path, and error bodies must never leak internals.

use anyhow::Result;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

mod common;

#[derive(Deserialize)]
struct TokenBody {
    #[serde(rename = "csrfToken")]
    csrf_token: String,
}

fn assert_hardened(headers: impl std::borrow::Borrow<HeaderMap>) {
    let headers = headers.borrow();
    assert_eq!(
        headers.get(header::X_CONTENT_TYPE_OPTIONS),
        Some(&HeaderValue::from_static("nosniff"))
    );
    assert_eq!(
        headers.get(header::X_FRAME_OPTIONS),
        Some(&HeaderValue::from_static("DENY"))
    );
    assert_eq!(
        headers.get(header::REFERRER_POLICY),
        Some(&HeaderValue::from_static("no-referrer"))
    );
    let csp = headers
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|v| v.to_str().ok())
        .expect("CSP header present");
    assert!(csp.contains("default-src 'self'"));
    assert!(csp.contains("frame-ancestors 'none'"));

    assert!(headers.get(header::SERVER).is_none());
    assert!(headers.get("x-powered-by").is_none());
}

#[tokio::test]
async fn header_set_on_success_paths() -> Result<()> {
    let server = common::test_server();

    assert_hardened(server.get("/").await.headers());
    assert_hardened(server.get("/csrf-token").await.headers());
    assert_hardened(server.get("/dashboard").await.headers());

    Ok(())
}

#[tokio::test]
async fn header_set_on_csrf_rejection() -> Result<()> {
    let server = common::test_server();

    let response = server
        .post("/login")
        .form(&[("username", "admin"), ("password", "password")])
        .await;
    response.assert_status_forbidden();
    assert_hardened(response.headers());

    Ok(())
}

#[tokio::test]
async fn header_set_on_cross_site_rejection() -> Result<()> {
    let server = common::test_server();

    let response = server
        .post("/login")
        .add_header(
            HeaderName::from_static("sec-fetch-site"),
            HeaderValue::from_static("cross-site"),
        )
        .form(&[("username", "admin"), ("password", "password")])
        .await;
    response.assert_status_forbidden();
    assert_hardened(response.headers());

    Ok(())
}

#[tokio::test]
async fn header_set_on_auth_failure() -> Result<()> {
    let server = common::test_server();
    let body: TokenBody = server.get("/csrf-token").await.json();

    let response = server
        .post("/login")
        .form(&[
            ("username", "admin"),
            ("password", "wrong"),
            ("_csrf", body.csrf_token.as_str()),
        ])
        .await;
    assert_eq!(response.status_code(), 401);
    assert_hardened(response.headers());

    Ok(())
}

#[tokio::test]
async fn header_set_on_unknown_route() -> Result<()> {
    let server = common::test_server();

    let response = server.get("/no-such-page").await;
    assert_eq!(response.status_code(), 404);
    assert_hardened(response.headers());

    Ok(())
}

#[tokio::test]
async fn rejection_bodies_never_contain_the_secret() -> Result<()> {
    let server = common::test_server();

    let issued = server.get("/csrf-token").await;
    let secret_cookie = issued
        .cookies()
        .get("csrf_secret")
        .expect("secret cookie set")
        .value()
        .to_string();

    let rejected = server
        .post("/login")
        .form(&[
            ("username", "admin"),
            ("password", "password"),
            ("_csrf", "aaaa.bbbb"),
        ])
        .await;
    rejected.assert_status_forbidden();

    let body = rejected.text();
    assert!(!body.contains(&secret_cookie));
    assert!(!body.contains("panicked"));
    assert!(!body.contains("src/"));

    Ok(())
}

#[tokio::test]
async fn auth_failure_body_is_generic() -> Result<()> {
    let server = common::test_server();
    let body: TokenBody = server.get("/csrf-token").await.json();

    let response = server
        .post("/login")
        .form(&[
            ("username", "admin'--"),
            ("password", "x"),
            ("_csrf", body.csrf_token.as_str()),
        ])
        .await;

    assert_eq!(response.status_code(), 401);
    let text = response.text();
    assert_eq!(text, "Invalid username or password");

    Ok(())
}
