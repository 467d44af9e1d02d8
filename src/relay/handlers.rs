//! Route handlers. Each one forwards to a single backend endpoint and
//! relays the answer; the only logic here is session handling and the few
//! response reshapes the admin pages expect.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Extension, Path, Query, State};
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Json, Response};
use reqwest::Method;
use serde_json::{json, Value};

use crate::config::Credential;
use crate::models::EntityId;
use crate::relay::error::RelayError;
use crate::relay::router::AppState;
use crate::relay::session::{clear_cookie, session_cookie};
use crate::relay::upstream::{UpstreamBody, UpstreamRequest, UpstreamResponse};

type RelayResult = Result<Response, RelayError>;

/// Backend answer as-is, except that a 401 becomes the standard
/// unauthorized body.
fn relay(resp: UpstreamResponse) -> RelayResult {
    if resp.status == StatusCode::UNAUTHORIZED {
        return Err(RelayError::Unauthorized);
    }
    Ok((resp.status, Json(resp.body)).into_response())
}

/// Keep only `keys` from the browser query; `page` defaults to 1.
fn pick_query(params: &HashMap<String, String>, keys: &[&str]) -> Vec<(String, String)> {
    keys.iter()
        .filter_map(|key| match params.get(*key) {
            Some(value) if !value.is_empty() => Some((key.to_string(), value.clone())),
            _ if *key == "page" => Some(("page".to_string(), "1".to_string())),
            _ => None,
        })
        .collect()
}

fn json_body(bytes: &Bytes) -> Result<Value, RelayError> {
    if bytes.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(bytes).map_err(|e| RelayError::InvalidRequest(format!("Invalid JSON body: {}", e)))
}

fn raw_body(headers: &HeaderMap, bytes: Bytes) -> UpstreamBody {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    UpstreamBody::Raw { bytes, content_type }
}

async fn forward(state: &AppState, req: UpstreamRequest) -> RelayResult {
    relay(state.upstream.forward(req).await?)
}

// ── Session ──────────────────────────────────────────────────────────

pub async fn login(State(state): State<AppState>, body: Bytes) -> RelayResult {
    let credentials = json_body(&body)?;
    let resp = state
        .upstream
        .forward(
            UpstreamRequest::new(Method::POST, "/admin/login", Credential::Anonymous)
                .body(UpstreamBody::Json(credentials)),
        )
        .await?;

    if !resp.status.is_success() {
        tracing::info!(status = resp.status.as_u16(), "admin login rejected");
        let body = if resp.body.is_null() {
            json!({ "message": "Login failed" })
        } else {
            resp.body
        };
        return Ok((resp.status, Json(body)).into_response());
    }

    let token = resp
        .body
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RelayError::InvalidUpstreamBody("login response has no token".to_string()))?;

    let cookie = session_cookie(token, &state.config.get().relay);
    tracing::info!("admin session started");
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(json!({ "success": true }))).into_response())
}

pub async fn logout() -> Response {
    (AppendHeaders([(SET_COOKIE, clear_cookie())]), Json(json!({ "success": true }))).into_response()
}

// ── Bookings ─────────────────────────────────────────────────────────

pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Query(params): Query<HashMap<String, String>>,
) -> RelayResult {
    let query = pick_query(&params, &["page", "search", "status", "payment"]);
    forward(&state, UpstreamRequest::new(Method::GET, "/admin/bookings", credential).query(query)).await
}

pub async fn create_booking(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    headers: HeaderMap,
    body: Bytes,
) -> RelayResult {
    let req = UpstreamRequest::new(Method::POST, "/admin/bookings", credential).body(raw_body(&headers, body));
    forward(&state, req).await
}

pub async fn booking_stats(State(state): State<AppState>, Extension(credential): Extension<Credential>) -> RelayResult {
    forward(&state, UpstreamRequest::new(Method::GET, "/admin/bookings/stats", credential)).await
}

pub async fn update_booking(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Path(id): Path<EntityId>,
    body: Bytes,
) -> RelayResult {
    let update = json_body(&body)?;
    let req = UpstreamRequest::new(Method::PUT, format!("/admin/bookings/{}", id), credential)
        .body(UpstreamBody::Json(update));
    forward(&state, req).await
}

pub async fn booking_action(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Path(id): Path<EntityId>,
    headers: HeaderMap,
    body: Bytes,
) -> RelayResult {
    let req = UpstreamRequest::new(Method::POST, format!("/admin/bookings/{}", id), credential)
        .body(raw_body(&headers, body));
    forward(&state, req).await
}

pub async fn check_in(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Path(id): Path<EntityId>,
) -> RelayResult {
    let req = UpstreamRequest::new(Method::POST, format!("/admin/bookings/{}/checkin", id), credential);
    forward(&state, req).await
}

pub async fn list_checkins(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Query(params): Query<HashMap<String, String>>,
) -> RelayResult {
    let query = pick_query(&params, &["page", "filter"]);
    forward(&state, UpstreamRequest::new(Method::GET, "/admin/checkins", credential).query(query)).await
}

// ── Rooms ────────────────────────────────────────────────────────────

pub async fn list_rooms(State(state): State<AppState>, Extension(credential): Extension<Credential>) -> RelayResult {
    let resp = state
        .upstream
        .forward(UpstreamRequest::new(Method::GET, "/admin/rooms", credential))
        .await?;
    if resp.status.is_success() {
        return Ok(Json(json!({ "rooms": resp.body })).into_response());
    }
    relay(resp)
}

pub async fn create_room(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    headers: HeaderMap,
    body: Bytes,
) -> RelayResult {
    let req = UpstreamRequest::new(Method::POST, "/admin/rooms", credential).body(raw_body(&headers, body));
    forward(&state, req).await
}

pub async fn get_room(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Path(id): Path<EntityId>,
) -> RelayResult {
    forward(&state, UpstreamRequest::new(Method::GET, format!("/admin/rooms/{}", id), credential)).await
}

pub async fn update_room(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Path(id): Path<EntityId>,
    headers: HeaderMap,
    body: Bytes,
) -> RelayResult {
    let req = UpstreamRequest::new(Method::POST, format!("/admin/rooms/{}", id), credential)
        .body(raw_body(&headers, body));
    forward(&state, req).await
}

pub async fn delete_room(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Path(id): Path<EntityId>,
) -> RelayResult {
    let resp = state
        .upstream
        .forward(UpstreamRequest::new(Method::DELETE, format!("/admin/rooms/{}", id), credential))
        .await?;
    if resp.status.is_success() {
        return Ok(Json(json!({ "message": "Deleted" })).into_response());
    }
    relay(resp)
}

// ── Dashboard, reports, profile ──────────────────────────────────────

pub async fn reports(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Query(params): Query<HashMap<String, String>>,
) -> RelayResult {
    let query = pick_query(&params, &["from", "to"]);
    forward(&state, UpstreamRequest::new(Method::GET, "/admin/reports", credential).query(query)).await
}

pub async fn alerts(State(state): State<AppState>, Extension(credential): Extension<Credential>) -> RelayResult {
    forward(&state, UpstreamRequest::new(Method::GET, "/admin/alerts", credential)).await
}

pub async fn dashboard(State(state): State<AppState>, Extension(credential): Extension<Credential>) -> RelayResult {
    forward(&state, UpstreamRequest::new(Method::GET, "/admin/dashboard", credential)).await
}

pub async fn get_profile(State(state): State<AppState>, Extension(credential): Extension<Credential>) -> RelayResult {
    forward(&state, UpstreamRequest::new(Method::GET, "/admin/profile", credential)).await
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    body: Bytes,
) -> RelayResult {
    let update = json_body(&body)?;
    let req = UpstreamRequest::new(Method::PUT, "/admin/profile", credential).body(UpstreamBody::Json(update));
    forward(&state, req).await
}

/// Deletes the signed-in admin account. The session goes with it.
pub async fn delete_profile(State(state): State<AppState>, Extension(credential): Extension<Credential>) -> RelayResult {
    let resp = state
        .upstream
        .forward(UpstreamRequest::new(Method::DELETE, "/admin/update", credential))
        .await?;
    if !resp.status.is_success() {
        return relay(resp);
    }
    tracing::info!("admin account deleted, session cleared");
    Ok((resp.status, AppendHeaders([(SET_COOKIE, clear_cookie())]), Json(resp.body)).into_response())
}

// ── Public ───────────────────────────────────────────────────────────

/// Guest booking request from the public site. The page redirects to
/// whatever `url` comes back.
pub async fn public_booking(State(state): State<AppState>, body: Bytes) -> RelayResult {
    let booking = json_body(&body)?;
    let resp = state
        .upstream
        .forward(
            UpstreamRequest::new(Method::POST, "/bookings", Credential::Anonymous)
                .body(UpstreamBody::Json(booking))
                .lenient(),
        )
        .await?;

    if resp.body.get("url").is_some() {
        return Ok(Json(resp.body).into_response());
    }

    let status = if resp.status.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(json!({ "url": "/thank-you", "data": resp.body }))).into_response())
}
