use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use slotwise_api::middleware::{auth::USER_ID_HEADER, error_handling::AppError};
use slotwise_core::errors::ConsultationError;
use slotwise_db::mock::repositories::MockConsultationStore;
use uuid::Uuid;

use crate::test_utils::{AsUser, TestContext, server_for};

#[rstest]
#[case::invalid_window(ConsultationError::InvalidWindow("end before start".into()), StatusCode::BAD_REQUEST)]
#[case::past_date(ConsultationError::PastDate(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()), StatusCode::BAD_REQUEST)]
#[case::validation(ConsultationError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case::slot_unavailable(ConsultationError::SlotUnavailable(Uuid::nil()), StatusCode::CONFLICT)]
#[case::slot_in_use(ConsultationError::SlotInUse(Uuid::nil()), StatusCode::CONFLICT)]
#[case::booking_not_active(ConsultationError::BookingNotActive(Uuid::nil()), StatusCode::CONFLICT)]
#[case::not_found(ConsultationError::NotFound("missing".into()), StatusCode::NOT_FOUND)]
#[case::authentication(ConsultationError::Authentication("who".into()), StatusCode::UNAUTHORIZED)]
#[case::authorization(ConsultationError::Authorization("no".into()), StatusCode::FORBIDDEN)]
#[case::persistence(ConsultationError::PersistenceFailure(eyre::eyre!("db down")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: ConsultationError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let ctx = TestContext::new();
    let missing = Uuid::new_v4();

    let response = ctx
        .server
        .post(&format!("/api/bookings/{}/confirm", missing))
        .as_user(ctx.buyer.id)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({
        "error": format!("Resource not found: Booking with ID {} not found", missing)
    }));
}

#[tokio::test]
async fn test_malformed_user_header_is_unauthorized() {
    let ctx = TestContext::new();

    ctx.server
        .get("/api/bookings")
        .add_query_param("role", "buyer")
        .add_header(
            axum::http::HeaderName::from_static(USER_ID_HEADER),
            axum::http::HeaderValue::from_static("not-a-uuid"),
        )
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let seller = Uuid::new_v4();
    let mut store = MockConsultationStore::new();
    store
        .expect_get_consultation_duration()
        .with(predicate::eq(seller))
        .times(1)
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let server = server_for(Arc::new(store));
    let response = server
        .get(&format!("/api/sellers/{}/consultation-duration", seller))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    ctx.server
        .get("/health")
        .await
        .assert_json(&json!({ "status": "ok" }));

    let version: serde_json::Value = ctx.server.get("/version").await.json();
    assert_eq!(version["name"], "slotwise-api");
}
