//! Cross-site request gate on fetch metadata.
//!
//! `Sec-Fetch-Site` is attached by the browser itself; a third-party page
//! cannot forge it for its victim's requests. That makes it a cookie-free
//! signal for rejecting cross-site state mutation before the CSRF guard
//! ever runs.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::security::error::SecurityError;

static SEC_FETCH_SITE: HeaderName = HeaderName::from_static("sec-fetch-site");

/// Per-request classification of the `Sec-Fetch-Site` signal.
///
/// `None` covers both an absent header (legacy clients) and the literal
/// `none` value (user-initiated navigation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSite {
    SameOrigin,
    SameSite,
    CrossSite,
    None,
}

impl FetchSite {
    pub fn classify(headers: &HeaderMap) -> Self {
        let Some(value) = headers
            .get(&SEC_FETCH_SITE)
            .and_then(|v| v.to_str().ok())
        else {
            return FetchSite::None;
        };
        if value.eq_ignore_ascii_case("same-origin") {
            FetchSite::SameOrigin
        } else if value.eq_ignore_ascii_case("same-site") {
            FetchSite::SameSite
        } else if value.eq_ignore_ascii_case("none") {
            FetchSite::None
        } else {
            // cross-site, and any unrecognized value fails closed.
            FetchSite::CrossSite
        }
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Middleware rejecting unsafe cross-site requests.
pub async fn origin_gate(request: Request, next: Next) -> Response {
    let site = FetchSite::classify(request.headers());
    let allowed = match site {
        FetchSite::None | FetchSite::SameOrigin => true,
        FetchSite::SameSite | FetchSite::CrossSite => is_safe_method(request.method()),
    };

    if allowed {
        next.run(request).await
    } else {
        tracing::warn!(
            site = ?site,
            method = %request.method(),
            path = %request.uri().path(),
            "Blocked cross-site request"
        );
        SecurityError::BlockedCrossSite.into_response()
    }
}
