use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route(
            "/api/bookings/:booking_id/confirm",
            post(handlers::booking::confirm_booking),
        )
        .route(
            "/api/bookings/:booking_id/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route(
            "/api/bookings/:booking_id/complete",
            post(handlers::booking::complete_booking),
        )
        .route(
            "/api/bookings/:booking_id/meeting-link",
            put(handlers::booking::update_meeting_link),
        )
}
