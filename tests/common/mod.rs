//! Shared utilities for integration testing.

use std::sync::Arc;

use axum_test::{TestServer, TestServerConfig};
use secure_login::auth::MemoryAuthenticator;
use secure_login::{AppConfig, HttpServer};

/// Build a test server over the full middleware pipeline, with a cookie
/// jar so the secret cookie persists across requests like a browser.
pub fn test_server() -> TestServer {
    server_with_config(AppConfig::default())
}

pub fn server_with_config(config: AppConfig) -> TestServer {
    let authenticator = Arc::new(MemoryAuthenticator::with_demo_users());
    let server = HttpServer::new(config, authenticator);

    let test_config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(server.router(), test_config)
        .expect("failed to build test server")
}

/// A server without a cookie jar, for simulating clients that drop or
/// never receive the secret cookie.
#[allow(dead_code)]
pub fn server_without_cookie_jar() -> TestServer {
    let authenticator = Arc::new(MemoryAuthenticator::with_demo_users());
    let server = HttpServer::new(AppConfig::default(), authenticator);
    TestServer::new(server.router()).expect("failed to build test server")
}
