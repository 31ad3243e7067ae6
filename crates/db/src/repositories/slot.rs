use crate::models::DbConsultationSlot;
use chrono::Utc;
use eyre::Result;
use slotwise_core::models::slot::{NewSlot, SlotFilter};
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

/// Inserts all slots of one window in a single transaction.
pub async fn create_slots(pool: &Pool<Postgres>, slots: &[NewSlot]) -> Result<Vec<DbConsultationSlot>> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(slots.len());

    for slot in slots {
        let row = sqlx::query_as::<_, DbConsultationSlot>(
            r#"
            INSERT INTO consultation_slots (id, seller_id, date, start_time, end_time, is_available, is_booked, created_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, FALSE, $6)
            RETURNING id, seller_id, date, start_time, end_time, is_available, is_booked, booking_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(slot.seller_id)
        .bind(slot.date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        created.push(row);
    }

    tx.commit().await?;
    tracing::debug!("Inserted {} consultation slots", created.len());
    Ok(created)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbConsultationSlot>> {
    let slot = sqlx::query_as::<_, DbConsultationSlot>(
        r#"
        SELECT id, seller_id, date, start_time, end_time, is_available, is_booked, booking_id, created_at
        FROM consultation_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn get_slots_by_seller(
    pool: &Pool<Postgres>,
    seller_id: Uuid,
    filter: &SlotFilter,
) -> Result<Vec<DbConsultationSlot>> {
    let slots = sqlx::query_as::<_, DbConsultationSlot>(
        r#"
        SELECT id, seller_id, date, start_time, end_time, is_available, is_booked, booking_id, created_at
        FROM consultation_slots
        WHERE seller_id = $1
          AND ($2::DATE IS NULL OR date >= $2)
          AND ($3::DATE IS NULL OR date <= $3)
          AND (NOT $4 OR (is_available AND NOT is_booked))
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(seller_id)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.available_only)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Conditional claim; `false` means another request got there first.
pub async fn claim_slot<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE consultation_slots
        SET is_booked = TRUE
        WHERE id = $1 AND is_available = TRUE AND is_booked = FALSE
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn set_booking_reference<'e, E: PgExecutor<'e>>(executor: E, id: Uuid, booking_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE consultation_slots
        SET booking_id = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(booking_id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Frees the slot only while it still references `booking_id`.
pub async fn release_slot<'e, E: PgExecutor<'e>>(executor: E, id: Uuid, booking_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE consultation_slots
        SET is_booked = FALSE, is_available = TRUE, booking_id = NULL
        WHERE id = $1 AND booking_id = $2
        "#,
    )
    .bind(id)
    .bind(booking_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Conditional delete; `false` when the slot is booked or already gone.
pub async fn delete_unbooked_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM consultation_slots
        WHERE id = $1 AND is_booked = FALSE
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
