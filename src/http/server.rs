//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up the security pipeline in its fixed order
//! - Wire up middleware (tracing, limits, request ID)
//! - Bind server to listener
//!
//! # Pipeline order
//! Outermost to innermost: request ID → trace → header hardener →
//! timeout → body limit → origin gate → cookie manager → CSRF guard →
//! handlers. The hardener and gate wrap everything below them, so
//! rejections, timeouts, and handler errors all leave with the full
//! security header set, and no handler runs on a blocked cross-site
//! request.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::Authenticator;
use crate::config::schema::AppConfig;
use crate::http::handlers;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::security::guard::{csrf_guard, CsrfProtection};
use crate::security::headers::HeaderHardenerLayer;
use crate::security::origin::origin_gate;

/// Application state injected into handlers and the CSRF guard.
#[derive(Clone)]
pub struct AppState {
    pub csrf: Arc<CsrfProtection>,
    pub authenticator: Arc<dyn Authenticator>,
}

/// HTTP server for the login service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig, authenticator: Arc<dyn Authenticator>) -> Self {
        let state = AppState {
            csrf: Arc::new(CsrfProtection::from_config(&config)),
            authenticator,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::login_page))
            .route("/dashboard", get(handlers::dashboard))
            .route("/csrf-token", get(handlers::issue_csrf_token))
            .route("/login", post(handlers::login))
            .layer(middleware::from_fn_with_state(state.clone(), csrf_guard))
            .layer(CookieManagerLayer::new())
            .layer(middleware::from_fn(origin_gate))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(HeaderHardenerLayer)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(
                X_REQUEST_ID.clone(),
                MakeRequestUuid,
            ))
            .with_state(state)
    }

    /// The assembled router; used by integration tests to drive the full
    /// pipeline without binding a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
