use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use slotwise_core::models::{
    profile::ConsultationDurationResponse,
    slot::{CreateAvailabilityResponse, SlotResponse},
};
use uuid::Uuid;

use crate::test_utils::{AsUser, TestContext, future_date};

async fn create_window(ctx: &TestContext, start: &str, end: &str) -> CreateAvailabilityResponse {
    let response = ctx
        .server
        .post("/api/availability")
        .as_user(ctx.seller.id)
        .json(&json!({ "date": future_date(), "start_time": start, "end_time": end }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_create_availability_splits_window() {
    let ctx = TestContext::new();

    let created = create_window(&ctx, "09:00:00", "10:30:00").await;

    assert_eq!(created.duration_minutes, 30);
    let starts: Vec<String> = created
        .slots
        .iter()
        .map(|s| s.start_time.format("%H:%M").to_string())
        .collect();
    assert_eq!(starts, vec!["09:00", "09:30", "10:00"]);
    assert!(created.slots.iter().all(|s| s.is_available && !s.is_booked));
}

#[tokio::test]
async fn test_create_availability_drops_partial_tail() {
    let ctx = TestContext::new();

    let created = create_window(&ctx, "09:00:00", "10:20:00").await;

    assert_eq!(created.slots.len(), 2);
    assert_eq!(created.slots[1].end_time.format("%H:%M").to_string(), "10:00");
}

#[rstest]
#[case::inverted("10:00:00", "09:00:00")]
#[case::shorter_than_slot("09:00:00", "09:15:00")]
#[tokio::test]
async fn test_create_availability_rejects_bad_window(#[case] start: &str, #[case] end: &str) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availability")
        .as_user(ctx.seller.id)
        .json(&json!({ "date": future_date(), "start_time": start, "end_time": end }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_availability_rejects_past_date() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availability")
        .as_user(ctx.seller.id)
        .json(&json!({ "date": "2020-01-01", "start_time": "09:00:00", "end_time": "10:00:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Date 2020-01-01 is in the past");
}

#[tokio::test]
async fn test_create_availability_rejects_overlap() {
    let ctx = TestContext::new();
    create_window(&ctx, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .post("/api/availability")
        .as_user(ctx.seller.id)
        .json(&json!({ "date": future_date(), "start_time": "09:30:00", "end_time": "11:00:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_availability_requires_user() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/availability")
        .json(&json!({ "date": future_date(), "start_time": "09:00:00", "end_time": "10:00:00" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_slots_filters_available() {
    let ctx = TestContext::new();
    let created = create_window(&ctx, "09:00:00", "10:00:00").await;

    ctx.server
        .post("/api/bookings")
        .as_user(ctx.buyer.id)
        .json(&json!({ "slot_id": created.slots[0].id }))
        .await
        .assert_status(StatusCode::CREATED);

    let all: Vec<SlotResponse> = ctx
        .server
        .get(&format!("/api/sellers/{}/slots", ctx.seller.id))
        .await
        .json();
    let available: Vec<SlotResponse> = ctx
        .server
        .get(&format!("/api/sellers/{}/slots", ctx.seller.id))
        .add_query_param("available_only", true)
        .await
        .json();

    assert_eq!(all.len(), 2);
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, created.slots[1].id);
}

#[tokio::test]
async fn test_delete_slot_rules() {
    let ctx = TestContext::new();
    let created = create_window(&ctx, "09:00:00", "10:00:00").await;
    let (booked, free) = (created.slots[0].id, created.slots[1].id);

    ctx.server
        .post("/api/bookings")
        .as_user(ctx.buyer.id)
        .json(&json!({ "slot_id": booked }))
        .await
        .assert_status(StatusCode::CREATED);

    ctx.server
        .delete(&format!("/api/slots/{}", free))
        .as_user(ctx.buyer.id)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .delete(&format!("/api/slots/{}", booked))
        .as_user(ctx.seller.id)
        .await
        .assert_status(StatusCode::CONFLICT);
    ctx.server
        .delete(&format!("/api/slots/{}", free))
        .as_user(ctx.seller.id)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .delete(&format!("/api/slots/{}", Uuid::new_v4()))
        .as_user(ctx.seller.id)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_consultation_duration_round_trip() {
    let ctx = TestContext::new();
    let path = format!("/api/sellers/{}/consultation-duration", ctx.seller.id);

    let updated = ctx
        .server
        .put(&path)
        .as_user(ctx.seller.id)
        .json(&json!({ "duration_minutes": 45 }))
        .await;
    updated.assert_status_ok();

    let current: ConsultationDurationResponse = ctx.server.get(&path).await.json();
    assert_eq!(current.duration_minutes, 45);

    let created = create_window(&ctx, "09:00:00", "10:30:00").await;
    assert_eq!(created.duration_minutes, 45);
    assert_eq!(created.slots.len(), 2);
}

#[tokio::test]
async fn test_consultation_duration_defaults_and_guards() {
    let ctx = TestContext::new();
    let path = format!("/api/sellers/{}/consultation-duration", ctx.buyer.id);

    let current: ConsultationDurationResponse = ctx.server.get(&path).await.json();
    assert_eq!(current.duration_minutes, 30);

    ctx.server
        .put(&path)
        .as_user(ctx.seller.id)
        .json(&json!({ "duration_minutes": 45 }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .put(&path)
        .as_user(ctx.buyer.id)
        .json(&json!({ "duration_minutes": 0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
