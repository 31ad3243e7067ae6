//! # Authentication Module
//!
//! Sign-in is handled by the upstream auth gateway, which forwards the
//! authenticated user's id in the `x-user-id` header. Handlers that act on
//! behalf of a user take an [`AuthenticatedUser`] argument; requests without a
//! valid header are rejected with `401 Unauthorized`.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use slotwise_core::errors::ConsultationError;
use uuid::Uuid;

use super::error_handling::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller, as identified by the auth gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);

impl AuthenticatedUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(USER_ID_HEADER).ok_or_else(|| {
            AppError(ConsultationError::Authentication(format!(
                "Missing {} header",
                USER_ID_HEADER
            )))
        })?;

        value
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map(AuthenticatedUser)
            .ok_or_else(|| {
                AppError(ConsultationError::Authentication(format!(
                    "Invalid {} header",
                    USER_ID_HEADER
                )))
            })
    }
}
