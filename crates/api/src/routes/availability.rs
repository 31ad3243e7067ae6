use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/sellers/:seller_id/consultation-duration",
            get(handlers::availability::get_consultation_duration)
                .put(handlers::availability::update_consultation_duration),
        )
        .route(
            "/api/sellers/:seller_id/slots",
            get(handlers::availability::list_slots),
        )
        .route(
            "/api/availability",
            post(handlers::availability::create_availability),
        )
        .route(
            "/api/slots/:slot_id",
            delete(handlers::availability::delete_slot),
        )
}
