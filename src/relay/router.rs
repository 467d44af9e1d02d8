use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;

use crate::config::ConfigStore;
use crate::relay::handlers::{
    alerts, booking_action, booking_stats, check_in, create_booking, create_room, dashboard, delete_profile,
    delete_room, get_profile, get_room, list_bookings, list_checkins, list_rooms, login, logout, public_booking,
    reports, update_booking, update_profile, update_room,
};
use crate::relay::health::health;
use crate::relay::session::require_session;
use crate::relay::upstream::UpstreamClient;

/// Room forms carry up to three images.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub config: ConfigStore,
}

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/stats", get(booking_stats))
        .route("/bookings/{id}", put(update_booking).post(booking_action))
        .route("/bookings/{id}/checkin", post(check_in))
        .route("/checkins", get(list_checkins))
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/{id}", get(get_room).post(update_room).delete(delete_room))
        .route("/reports", get(reports))
        .route("/alerts", get(alerts))
        .route("/dashboard", get(dashboard))
        .route("/profile", get(get_profile).put(update_profile).delete(delete_profile))
        .route_layer(middleware::from_fn(require_session));

    Router::new()
        .route("/health", get(health))
        .route("/api/admin-login", post(login))
        .route("/api/admin-logout", post(logout))
        .route("/api/book", post(public_booking))
        .nest("/api/admin", admin)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
