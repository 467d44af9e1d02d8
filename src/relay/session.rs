//! The `admin-token` session cookie.
//!
//! The browser never sees the backend token: login stores it in an
//! http-only cookie and every admin route turns it back into a bearer
//! credential.

use axum::body::Body;
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::{Credential, RelayConfig};
use crate::relay::error::RelayError;

pub const SESSION_COOKIE: &str = "admin-token";

/// Value of the session cookie, if present and non-empty.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value storing `token`.
pub fn session_cookie(token: &str, config: &RelayConfig) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}",
        SESSION_COOKIE, token, config.session_max_age_seconds
    );
    if config.secure_cookies {
        cookie.push_str("; Secure; SameSite=Strict");
    } else {
        cookie.push_str("; SameSite=Lax");
    }
    cookie
}

/// `Set-Cookie` value that removes the session.
pub fn clear_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; Max-Age=0", SESSION_COOKIE)
}

/// Middleware for admin routes: rejects requests without a session and
/// hands the bearer credential to the handler through request extensions.
pub async fn require_session(mut req: Request<Body>, next: Next) -> Response {
    let Some(token) = token_from_headers(req.headers()) else {
        tracing::debug!(path = %req.uri().path(), "admin request without session");
        return RelayError::Unauthorized.into_response();
    };
    req.extensions_mut().insert(Credential::bearer(token));
    next.run(req).await
}
