use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id UUID PRIMARY KEY,
            display_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            avatar_url TEXT NULL,
            consultation_duration INTEGER NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_consultation_duration
                CHECK (consultation_duration IS NULL OR consultation_duration BETWEEN 1 AND 480)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create consultation_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS consultation_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            seller_id UUID NOT NULL REFERENCES profiles(id),
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            is_booked BOOLEAN NOT NULL DEFAULT FALSE,
            booking_id UUID NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create consultation_bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS consultation_bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slot_id UUID NOT NULL,
            buyer_id UUID NOT NULL REFERENCES profiles(id),
            seller_id UUID NOT NULL REFERENCES profiles(id),
            status VARCHAR(16) NOT NULL,
            payment_status VARCHAR(16) NOT NULL,
            payment_amount BIGINT NOT NULL DEFAULT 0,
            notes TEXT NULL,
            meeting_link TEXT NULL,
            booking_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_booking_status
                CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed')),
            CONSTRAINT valid_payment_status
                CHECK (payment_status IN ('pending', 'paid', 'refunded', 'failed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one active booking per slot
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_consultation_bookings_active_slot
            ON consultation_bookings(slot_id)
            WHERE status IN ('pending', 'confirmed');
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_consultation_slots_seller_date ON consultation_slots(seller_id, date);
        CREATE INDEX IF NOT EXISTS idx_consultation_bookings_buyer_id ON consultation_bookings(buyer_id);
        CREATE INDEX IF NOT EXISTS idx_consultation_bookings_seller_id ON consultation_bookings(seller_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
