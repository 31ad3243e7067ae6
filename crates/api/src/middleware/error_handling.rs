//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so that every
//! failed user action gets a consistent, displayable message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotwise_core::errors::ConsultationError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `ConsultationError` and implements `IntoResponse`.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotwise_api::middleware::error_handling::AppError;
/// use slotwise_core::errors::ConsultationError;
/// use uuid::Uuid;
///
/// async fn handler(id: Uuid) -> Result<Json<()>, AppError> {
///     Err(ConsultationError::NotFound(format!("Slot with ID {} not found", id)).into())
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ConsultationError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ConsultationError::InvalidWindow(_)
            | ConsultationError::PastDate(_)
            | ConsultationError::Validation(_) => StatusCode::BAD_REQUEST,
            ConsultationError::SlotUnavailable(_)
            | ConsultationError::SlotInUse(_)
            | ConsultationError::BookingNotActive(_) => StatusCode::CONFLICT,
            ConsultationError::NotFound(_) => StatusCode::NOT_FOUND,
            ConsultationError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ConsultationError::Authorization(_) => StatusCode::FORBIDDEN,
            ConsultationError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConsultationError> for AppError {
    fn from(err: ConsultationError) -> Self {
        AppError(err)
    }
}

/// Store failures surfaced directly from a handler.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ConsultationError::PersistenceFailure(err))
    }
}
