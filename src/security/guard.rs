//! CSRF synchronizer-token guard.
//!
//! Safe methods pass straight through. Mutating methods must present a
//! token (form field, JSON field, or header) that verifies against the
//! secret in the request's own cookie. Per request the check moves
//! unchecked → token extracted → valid/invalid; invalid short-circuits
//! with a fixed 403 body.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_cookies::Cookies;

use crate::config::schema::AppConfig;
use crate::http::server::AppState;
use crate::security::cookie::CsrfCookieStore;
use crate::security::error::SecurityError;
use crate::security::token::TokenCodec;

/// Composition of the token codec and cookie store plus naming config.
///
/// One instance is shared through app state; it holds no per-request
/// state of its own.
pub struct CsrfProtection {
    codec: TokenCodec,
    store: CsrfCookieStore,
    field_name: String,
    header_name: String,
    max_body_bytes: usize,
}

impl CsrfProtection {
    pub fn from_config(config: &AppConfig) -> Self {
        let store = CsrfCookieStore::new(
            config.csrf.cookie_name.clone(),
            config.environment.is_production(),
            config.csrf.max_age_secs,
        );
        Self {
            codec: TokenCodec,
            store,
            field_name: config.csrf.field_name.clone(),
            header_name: config.csrf.header_name.clone(),
            max_body_bytes: config.limits.max_body_bytes,
        }
    }

    pub fn store(&self) -> &CsrfCookieStore {
        &self.store
    }

    /// Name of the form/JSON field carrying the token, for page renderers.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Issue a token for the request's session, rotating the secret
    /// cookie first if needed. GET issuance never requires a prior token.
    pub fn issue(&self, cookies: &Cookies) -> String {
        let secret = self.store.ensure_secret(cookies);
        self.codec.issue(&secret)
    }

    /// Verify a presented token against the request's secret cookie.
    pub fn verify_presented(&self, cookies: &Cookies, token: &str) -> Result<(), SecurityError> {
        let secret = self
            .store
            .read_secret(cookies)
            .ok_or(SecurityError::InvalidSecretCookie)?;
        if self.codec.verify(&secret, token) {
            Ok(())
        } else {
            Err(SecurityError::BadCsrfToken)
        }
    }

    /// Pull the presented token out of the request, header first, then
    /// the configured field in a JSON or form-encoded body.
    fn extract_token(&self, headers: &HeaderMap, body: &[u8]) -> Option<String> {
        if let Some(value) = headers
            .get(self.header_name.as_str())
            .and_then(|v| v.to_str().ok())
        {
            return Some(value.to_string());
        }

        if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
            if let Some(token) = json.get(&self.field_name).and_then(|v| v.as_str()) {
                return Some(token.to_string());
            }
        }

        if let Ok(fields) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
            for (name, value) in fields {
                if name == self.field_name {
                    return Some(value);
                }
            }
        }

        None
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Middleware enforcing the synchronizer-token pattern.
pub async fn csrf_guard(
    State(state): State<AppState>,
    cookies: Cookies,
    request: Request,
    next: Next,
) -> Response {
    if !is_mutating(request.method()) {
        return next.run(request).await;
    }

    let csrf = &state.csrf;

    // 1. Buffer the body so the token can be read without consuming the
    //    request; handlers get the bytes back afterwards.
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, csrf.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(error = %err, "Failed to buffer request body");
            return SecurityError::MissingCsrfToken.into_response();
        }
    };

    // 2. Token extraction happens before cookie inspection so a missing
    //    token is always reported as missing, whatever the cookie state.
    let outcome = match csrf.extract_token(&parts.headers, &bytes) {
        None => Err(SecurityError::MissingCsrfToken),
        Some(token) => csrf.verify_presented(&cookies, &token),
    };

    match outcome {
        Ok(()) => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Err(err) => {
            tracing::warn!(
                kind = err.kind(),
                method = %parts.method,
                path = %parts.uri.path(),
                "CSRF check failed"
            );
            err.into_response()
        }
    }
}
