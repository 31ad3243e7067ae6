//! # Booking Handlers
//!
//! Buyers claim slots and confirm payment; either party may cancel; sellers
//! complete bookings and share meeting links. Listing returns the caller's
//! bookings split into upcoming and past, joined with the other party's
//! profile.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use slotwise_core::models::{
    booking::{Booking, CreateBookingRequest, UpdateMeetingLinkRequest},
    profile::{BookingsOverview, ViewerRole},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AuthenticatedUser, error_handling::AppError},
};

/// Query parameters for the booking list endpoint
#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    /// Which side of the bookings the caller is on
    pub role: ViewerRole,
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let now = Utc::now().naive_utc();
    let booking = state.service.book_slot(user.id(), &payload, now).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    user: AuthenticatedUser,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<BookingsOverview>, AppError> {
    let today = Utc::now().date_naive();
    let overview = state
        .service
        .bookings_overview(query.role, user.id(), today)
        .await?;

    Ok(Json(overview))
}

#[axum::debug_handler]
pub async fn confirm_booking(
    State(state): State<Arc<ApiState>>,
    Path(booking_id): Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<Json<Booking>, AppError> {
    let booking = state.service.confirm_booking(user.id(), booking_id).await?;

    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(booking_id): Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<Json<Booking>, AppError> {
    let booking = state.service.cancel_booking(user.id(), booking_id).await?;

    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn complete_booking(
    State(state): State<Arc<ApiState>>,
    Path(booking_id): Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<Json<Booking>, AppError> {
    let now = Utc::now().naive_utc();
    let booking = state
        .service
        .complete_booking(user.id(), booking_id, now)
        .await?;

    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn update_meeting_link(
    State(state): State<Arc<ApiState>>,
    Path(booking_id): Path<Uuid>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateMeetingLinkRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .service
        .update_meeting_link(user.id(), booking_id, payload.meeting_link.as_deref())
        .await?;

    Ok(Json(booking))
}
