use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use slotwise_core::models::{
    booking::{Booking, BookingStatus, PaymentStatus},
    profile::{BookingsOverview, ViewerRole},
    slot::{CreateAvailabilityResponse, SlotResponse},
};
use test_log::test;
use uuid::Uuid;

use crate::test_utils::{AsUser, TestContext, future_date};

async fn open_slots(ctx: &TestContext) -> Vec<SlotResponse> {
    let response = ctx
        .server
        .post("/api/availability")
        .as_user(ctx.seller.id)
        .json(&json!({ "date": future_date(), "start_time": "14:00:00", "end_time": "15:00:00" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<CreateAvailabilityResponse>().slots
}

async fn book(ctx: &TestContext, slot_id: Uuid, body: serde_json::Value) -> Booking {
    let mut payload = body;
    payload["slot_id"] = json!(slot_id);
    let response = ctx
        .server
        .post("/api/bookings")
        .as_user(ctx.buyer.id)
        .json(&payload)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[test(tokio::test)]
async fn test_unpaid_booking_is_pending() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;

    let booking = book(&ctx, slots[0].id, json!({ "payment_amount": 5000, "notes": "  " })).await;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.payment_status, PaymentStatus::Pending);
    assert_eq!(booking.payment_amount, 5000);
    assert_eq!(booking.notes, None);
    assert_eq!(booking.seller_id, ctx.seller.id);
    assert_eq!(booking.booking_date, future_date());
}

#[test(tokio::test)]
async fn test_paid_booking_is_confirmed() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;

    let booking = book(&ctx, slots[0].id, json!({ "payment_amount": 5000, "paid": true })).await;

    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.payment_status, PaymentStatus::Paid);
}

#[test(tokio::test)]
async fn test_double_booking_conflicts() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;
    book(&ctx, slots[0].id, json!({})).await;

    let response = ctx
        .server
        .post("/api/bookings")
        .as_user(Uuid::new_v4())
        .json(&json!({ "slot_id": slots[0].id }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[test(tokio::test)]
async fn test_seller_cannot_book_own_slot() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;

    ctx.server
        .post("/api/bookings")
        .as_user(ctx.seller.id)
        .json(&json!({ "slot_id": slots[0].id }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_cancel_frees_slot_and_refunds() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;
    let booking = book(&ctx, slots[0].id, json!({ "paid": true })).await;

    let response = ctx
        .server
        .post(&format!("/api/bookings/{}/cancel", booking.id))
        .as_user(ctx.seller.id)
        .await;
    response.assert_status_ok();
    let cancelled: Booking = response.json();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);

    let rebooked = book(&ctx, slots[0].id, json!({})).await;
    assert_eq!(rebooked.slot_id, slots[0].id);

    ctx.server
        .post(&format!("/api/bookings/{}/cancel", booking.id))
        .as_user(ctx.buyer.id)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[test(tokio::test)]
async fn test_cancel_by_stranger_is_forbidden() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;
    let booking = book(&ctx, slots[0].id, json!({})).await;

    ctx.server
        .post(&format!("/api/bookings/{}/cancel", booking.id))
        .as_user(Uuid::new_v4())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test(tokio::test)]
async fn test_confirm_pending_booking() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;
    let booking = book(&ctx, slots[0].id, json!({ "payment_amount": 2500 })).await;

    let confirmed: Booking = ctx
        .server
        .post(&format!("/api/bookings/{}/confirm", booking.id))
        .as_user(ctx.buyer.id)
        .await
        .json();

    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.payment_status, PaymentStatus::Paid);
}

#[test(tokio::test)]
async fn test_complete_before_end_is_rejected() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;
    let booking = book(&ctx, slots[0].id, json!({ "paid": true })).await;

    ctx.server
        .post(&format!("/api/bookings/{}/complete", booking.id))
        .as_user(ctx.seller.id)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_meeting_link_is_seller_only() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;
    let booking = book(&ctx, slots[0].id, json!({ "paid": true })).await;
    let path = format!("/api/bookings/{}/meeting-link", booking.id);

    ctx.server
        .put(&path)
        .as_user(ctx.buyer.id)
        .json(&json!({ "meeting_link": "https://meet.example/abc" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let updated: Booking = ctx
        .server
        .put(&path)
        .as_user(ctx.seller.id)
        .json(&json!({ "meeting_link": " https://meet.example/abc " }))
        .await
        .json();
    assert_eq!(updated.meeting_link.as_deref(), Some("https://meet.example/abc"));

    let cleared: Booking = ctx
        .server
        .put(&path)
        .as_user(ctx.seller.id)
        .json(&json!({ "meeting_link": "" }))
        .await
        .json();
    assert_eq!(cleared.meeting_link, None);
}

#[test(tokio::test)]
async fn test_overview_joins_counterpart() {
    let ctx = TestContext::new();
    let slots = open_slots(&ctx).await;
    book(&ctx, slots[1].id, json!({})).await;
    book(&ctx, slots[0].id, json!({})).await;

    let buyer_view: BookingsOverview = ctx
        .server
        .get("/api/bookings")
        .add_query_param("role", "buyer")
        .as_user(ctx.buyer.id)
        .await
        .json();
    let seller_view: BookingsOverview = ctx
        .server
        .get("/api/bookings")
        .add_query_param("role", "seller")
        .as_user(ctx.seller.id)
        .await
        .json();

    assert_eq!(buyer_view.role, ViewerRole::Buyer);
    assert!(buyer_view.past.is_empty());
    let upcoming: Vec<Uuid> = buyer_view.upcoming.iter().map(|v| v.booking.slot_id).collect();
    assert_eq!(upcoming, vec![slots[0].id, slots[1].id]);
    assert!(buyer_view
        .upcoming
        .iter()
        .all(|v| v.counterpart.display_name == ctx.seller.display_name));

    assert_eq!(seller_view.upcoming.len(), 2);
    assert_eq!(seller_view.upcoming[0].counterpart.id, ctx.buyer.id);
}

#[test(tokio::test)]
async fn test_overview_requires_role() {
    let ctx = TestContext::new();

    ctx.server
        .get("/api/bookings")
        .add_query_param("role", "admin")
        .as_user(ctx.buyer.id)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
