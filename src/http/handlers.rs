//! Route handlers.
//!
//! Pages are rendered inline; this service has no template layer. All
//! user-supplied text is HTML-escaped before it reaches markup, and the
//! login redirect is built with URL encoding rather than string pasting.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_cookies::Cookies;

use crate::auth::AuthError;
use crate::http::server::AppState;

/// Internal fault surfaced by a handler.
///
/// Maps to a generic 500; the cause is logged server-side and never
/// echoed to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

#[derive(Serialize)]
pub struct CsrfTokenResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub user: Option<String>,
}

/// `GET /` — login page with the token embedded as a hidden field.
pub async fn login_page(State(state): State<AppState>, cookies: Cookies) -> Html<String> {
    let token = state.csrf.issue(&cookies);
    Html(render_login_page(state.csrf.field_name(), &token))
}

/// `GET /csrf-token` — token issuance for script clients.
pub async fn issue_csrf_token(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Json<CsrfTokenResponse> {
    let token = state.csrf.issue(&cookies);
    Json(CsrfTokenResponse { csrf_token: token })
}

/// `POST /login` — credential check behind the security pipeline.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state
        .authenticator
        .authenticate(&form.username, &form.password)
        .await?
    {
        Some(identity) => {
            tracing::info!(username = %identity.username, "Login succeeded");
            let query = serde_urlencoded::to_string([("user", identity.username.as_str())])
                .unwrap_or_default();
            Ok(Redirect::to(&format!("/dashboard?{query}")).into_response())
        }
        None => {
            tracing::warn!(username = %form.username, "Login rejected");
            Ok((StatusCode::UNAUTHORIZED, "Invalid username or password").into_response())
        }
    }
}

/// `GET /dashboard` — post-login landing page.
pub async fn dashboard(Query(query): Query<DashboardQuery>) -> Html<String> {
    let greeting = match query.user.as_deref() {
        Some(user) => format!("Welcome, {}!", escape_html(user)),
        None => "Welcome!".to_string(),
    };
    Html(render_page(
        "Dashboard",
        &format!("<h1>{greeting}</h1>\n<p><a href=\"/\">Log out</a></p>"),
    ))
}

fn render_login_page(field_name: &str, token: &str) -> String {
    let body = format!(
        "<h1>Sign in</h1>\n\
         <form id=\"login-form\" action=\"/login\" method=\"POST\">\n\
           <label>Username <input type=\"text\" name=\"username\" autocomplete=\"username\"></label>\n\
           <label>Password <input type=\"password\" name=\"password\" autocomplete=\"current-password\"></label>\n\
           <input type=\"hidden\" name=\"{}\" value=\"{}\">\n\
           <button type=\"submit\">Log in</button>\n\
         </form>",
        escape_html(field_name),
        token
    );
    render_page("Sign in", &body)
}

fn render_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape_html(title),
        body
    )
}

/// Minimal HTML entity escaping for text interpolated into markup.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
