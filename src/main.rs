//! Hardened login service.
//!
//! A small login web application built with Tokio and Axum whose every
//! request passes through a fixed security pipeline before reaching a
//! handler.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                LOGIN SERVICE                  │
//!                      │                                               │
//!   Client Request     │  ┌──────────┐   ┌─────────┐   ┌───────────┐  │
//!   ───────────────────┼─▶│ header   │──▶│ origin  │──▶│   csrf    │  │
//!                      │  │ hardener │   │  gate   │   │   guard   │  │
//!                      │  └──────────┘   └─────────┘   └─────┬─────┘  │
//!                      │                                     │        │
//!                      │                                     ▼        │
//!   Client Response    │  ┌──────────┐                ┌───────────┐   │
//!   ◀──────────────────┼──│ security │◀───────────────│  handlers │◀──┼── Authenticator
//!                      │  │ headers  │                │ (/login…) │   │
//!                      │  └──────────┘                └───────────┘   │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │          Cross-Cutting Concerns          │ │
//!                      │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                      │  │  │ config │ │observability│ │  auth   │ │ │
//!                      │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use secure_login::auth::MemoryAuthenticator;
use secure_login::config::loader;
use secure_login::config::schema::AppConfig;
use secure_login::http::HttpServer;
use secure_login::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("secure-login v0.1.0 starting");

    // Load configuration from APP_CONFIG if given, defaults otherwise.
    let mut config = match std::env::var("APP_CONFIG") {
        Ok(path) => loader::load_config(Path::new(&path))?,
        Err(_) => AppConfig::default(),
    };

    // APP_ENV wins over the config file for the environment flag.
    if let Some(environment) = loader::environment_from_env() {
        config.environment = environment;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        environment = ?config.environment,
        csrf_cookie = %config.csrf.cookie_name,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // The credential store collaborator. Swap for a real backend in
    // deployments; the demo store carries the sample users.
    let authenticator = Arc::new(MemoryAuthenticator::with_demo_users());

    // Create and run HTTP server
    let server = HttpServer::new(config, authenticator);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
