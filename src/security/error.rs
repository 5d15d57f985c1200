//! Security rejection kinds.
//!
//! Every kind maps to a 403 with a short fixed body. The Display strings
//! are the complete client-facing message; nothing else is attached.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A request rejected by the security pipeline.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SecurityError {
    /// A mutating request arrived without a token.
    #[error("Missing CSRF token")]
    MissingCsrfToken,

    /// The presented token did not verify against the request's secret.
    #[error("Invalid CSRF token")]
    BadCsrfToken,

    /// The secret cookie was absent or failed to decode on a mutating
    /// request. The client needs to re-fetch the page or the token
    /// endpoint to get a fresh secret.
    #[error("Invalid CSRF session")]
    InvalidSecretCookie,

    /// Fetch metadata marked the request cross-site with an unsafe method.
    #[error("Blocked cross-site request")]
    BlockedCrossSite,
}

impl SecurityError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SecurityError::MissingCsrfToken => "MISSING_CSRF_TOKEN",
            SecurityError::BadCsrfToken => "BAD_CSRF_TOKEN",
            SecurityError::InvalidSecretCookie => "INVALID_SECRET_COOKIE",
            SecurityError::BlockedCrossSite => "BLOCKED_CROSS_SITE",
        }
    }
}

impl IntoResponse for SecurityError {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, self.to_string()).into_response()
    }
}
