use super::slot;
use crate::models::DbConsultationBooking;
use chrono::Utc;
use eyre::Result;
use slotwise_core::models::{
    booking::{BookingStatus, NewBooking, PaymentStatus},
    profile::ViewerRole,
};
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

const BOOKING_COLUMNS: &str = "id, slot_id, buyer_id, seller_id, status, payment_status, payment_amount, \
     notes, meeting_link, booking_date, start_time, end_time, created_at, updated_at";

pub async fn create_booking<'e, E: PgExecutor<'e>>(
    executor: E,
    booking: &NewBooking,
) -> Result<DbConsultationBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, slot_id={}, buyer_id={}, status={}",
        id, booking.slot_id, booking.buyer_id, booking.status
    );

    let query = format!(
        r#"
        INSERT INTO consultation_bookings
            (id, slot_id, buyer_id, seller_id, status, payment_status, payment_amount,
             notes, booking_date, start_time, end_time, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        RETURNING {}
        "#,
        BOOKING_COLUMNS
    );
    let row = sqlx::query_as::<_, DbConsultationBooking>(&query)
        .bind(id)
        .bind(booking.slot_id)
        .bind(booking.buyer_id)
        .bind(booking.seller_id)
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(booking.payment_amount)
        .bind(booking.notes.as_deref())
        .bind(booking.booking_date)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(now)
        .fetch_one(executor)
        .await?;

    Ok(row)
}

/// Claims the slot, inserts the booking and points the slot at it in one
/// transaction. `None` when the claim finds the slot taken; nothing is
/// written in that case or on any error.
pub async fn book_slot(pool: &Pool<Postgres>, booking: &NewBooking) -> Result<Option<DbConsultationBooking>> {
    let mut tx = pool.begin().await?;

    if !slot::claim_slot(&mut *tx, booking.slot_id).await? {
        return Ok(None);
    }
    let row = create_booking(&mut *tx, booking).await?;
    slot::set_booking_reference(&mut *tx, booking.slot_id, row.id).await?;

    tx.commit().await?;
    Ok(Some(row))
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbConsultationBooking>> {
    let query = format!("SELECT {} FROM consultation_bookings WHERE id = $1", BOOKING_COLUMNS);
    let row = sqlx::query_as::<_, DbConsultationBooking>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

fn status_texts(statuses: &[BookingStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

/// Conditional transition; `None` when the booking is not in `expected`.
pub async fn update_booking_status<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    expected: &[BookingStatus],
    status: BookingStatus,
    payment_status: PaymentStatus,
) -> Result<Option<DbConsultationBooking>> {
    let query = format!(
        r#"
        UPDATE consultation_bookings
        SET status = $2, payment_status = $3, updated_at = $4
        WHERE id = $1 AND status = ANY($5)
        RETURNING {}
        "#,
        BOOKING_COLUMNS
    );
    let row = sqlx::query_as::<_, DbConsultationBooking>(&query)
        .bind(id)
        .bind(status.as_str())
        .bind(payment_status.as_str())
        .bind(Utc::now())
        .bind(status_texts(expected))
        .fetch_optional(executor)
        .await?;

    match &row {
        Some(_) => tracing::debug!("Booking {} moved to {} / {}", id, status, payment_status),
        None => tracing::debug!("Booking {} was not in {:?}; left unchanged", id, expected),
    }
    Ok(row)
}

/// Cancels the booking and frees its slot in one transaction.
pub async fn cancel_and_release(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected: &[BookingStatus],
    payment_status: PaymentStatus,
) -> Result<Option<DbConsultationBooking>> {
    let mut tx = pool.begin().await?;

    let Some(row) =
        update_booking_status(&mut *tx, id, expected, BookingStatus::Cancelled, payment_status).await?
    else {
        return Ok(None);
    };
    if !slot::release_slot(&mut *tx, row.slot_id, id).await? {
        tracing::warn!("Slot {} no longer referenced booking {}", row.slot_id, id);
    }

    tx.commit().await?;
    Ok(Some(row))
}

/// Only active bookings take a link; `None` otherwise.
pub async fn update_meeting_link(
    pool: &Pool<Postgres>,
    id: Uuid,
    meeting_link: Option<&str>,
) -> Result<Option<DbConsultationBooking>> {
    let query = format!(
        r#"
        UPDATE consultation_bookings
        SET meeting_link = $2, updated_at = $3
        WHERE id = $1 AND status = ANY($4)
        RETURNING {}
        "#,
        BOOKING_COLUMNS
    );
    let row = sqlx::query_as::<_, DbConsultationBooking>(&query)
        .bind(id)
        .bind(meeting_link)
        .bind(Utc::now())
        .bind(status_texts(&BookingStatus::ACTIVE))
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn get_bookings_for_user(
    pool: &Pool<Postgres>,
    role: ViewerRole,
    user_id: Uuid,
) -> Result<Vec<DbConsultationBooking>> {
    let column = match role {
        ViewerRole::Buyer => "buyer_id",
        ViewerRole::Seller => "seller_id",
    };
    let query = format!(
        "SELECT {} FROM consultation_bookings WHERE {} = $1 ORDER BY booking_date ASC, start_time ASC",
        BOOKING_COLUMNS, column
    );
    let rows = sqlx::query_as::<_, DbConsultationBooking>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
