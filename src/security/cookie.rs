//! Secret cookie lifecycle.
//!
//! The secret rides in an httpOnly, SameSite=Strict cookie scoped to the
//! whole site. Page scripts never see it; the server only rotates it when
//! the cookie is absent or fails to decode.

use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use crate::security::token::Secret;

/// Manages the server-issued secret cookie.
pub struct CsrfCookieStore {
    cookie_name: String,
    secure: bool,
    max_age_secs: Option<u64>,
}

impl CsrfCookieStore {
    pub fn new(cookie_name: impl Into<String>, secure: bool, max_age_secs: Option<u64>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            secure,
            max_age_secs,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Read the secret from the request's cookie, if structurally valid.
    pub fn read_secret(&self, cookies: &Cookies) -> Option<Secret> {
        cookies
            .get(&self.cookie_name)
            .and_then(|cookie| Secret::decode(cookie.value()))
    }

    /// Return the current secret, rotating it if absent or invalid.
    ///
    /// Writes at most one cookie per request lifecycle: a valid existing
    /// cookie is left untouched, and tower-cookies collapses repeated adds
    /// of the same name into a single Set-Cookie.
    pub fn ensure_secret(&self, cookies: &Cookies) -> Secret {
        if let Some(secret) = self.read_secret(cookies) {
            return secret;
        }
        let secret = Secret::generate();
        cookies.add(self.build_cookie(secret.encode()));
        secret
    }

    fn build_cookie(&self, value: String) -> Cookie<'static> {
        let mut builder = Cookie::build((self.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure);
        if let Some(secs) = self.max_age_secs {
            builder = builder.max_age(Duration::seconds(secs as i64));
        }
        builder.build()
    }
}
