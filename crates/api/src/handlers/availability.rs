//! # Availability Handlers
//!
//! Endpoints a seller uses to manage consultation availability: the
//! consultation duration setting, turning availability windows into slots,
//! listing slots and deleting unbooked ones.
//!
//! Slot generation itself lives in `slotwise_core::slots`; the handlers only
//! pass in the caller's identity and today's date.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use slotwise_core::{
    errors::ConsultationError,
    models::{
        profile::{ConsultationDurationResponse, UpdateConsultationDurationRequest},
        slot::{CreateAvailabilityResponse, SlotFilter, SlotResponse},
        window::CreateAvailabilityRequest,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AuthenticatedUser, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn get_consultation_duration(
    State(state): State<Arc<ApiState>>,
    Path(seller_id): Path<Uuid>,
) -> Result<Json<ConsultationDurationResponse>, AppError> {
    let duration = state.service.consultation_duration(seller_id).await?;

    Ok(Json(ConsultationDurationResponse {
        seller_id,
        duration_minutes: duration.minutes(),
    }))
}

#[axum::debug_handler]
pub async fn update_consultation_duration(
    State(state): State<Arc<ApiState>>,
    Path(seller_id): Path<Uuid>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateConsultationDurationRequest>,
) -> Result<Json<ConsultationDurationResponse>, AppError> {
    if user.id() != seller_id {
        return Err(AppError(ConsultationError::Authorization(
            "Sellers can only change their own consultation duration".to_string(),
        )));
    }

    let duration = state
        .service
        .set_consultation_duration(seller_id, payload.duration_minutes)
        .await?;

    Ok(Json(ConsultationDurationResponse {
        seller_id,
        duration_minutes: duration.minutes(),
    }))
}

/// Splits the caller's availability window into bookable slots
///
/// # Endpoint
///
/// ```text
/// POST /api/availability
/// { "date": "2030-05-14", "start_time": "09:00:00", "end_time": "10:30:00" }
/// ```
///
/// # Errors
///
/// * `400` - the window is inverted, shorter than one slot, in the past, or
///   overlaps existing slots
#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<ApiState>>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateAvailabilityRequest>,
) -> Result<(StatusCode, Json<CreateAvailabilityResponse>), AppError> {
    let window = payload.into_window(user.id());
    let today = Utc::now().date_naive();

    let (duration, slots) = state.service.create_availability(&window, today).await?;

    let response = CreateAvailabilityResponse {
        duration_minutes: duration.minutes(),
        slots: slots.into_iter().map(SlotResponse::from).collect(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Path(seller_id): Path<Uuid>,
    Query(filter): Query<SlotFilter>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let slots = state.service.list_slots(seller_id, &filter).await?;

    Ok(Json(slots.into_iter().map(SlotResponse::from).collect()))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<StatusCode, AppError> {
    state.service.delete_slot(user.id(), slot_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
