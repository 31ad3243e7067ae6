use crate::models::DbProfile;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_consultation_duration(pool: &Pool<Postgres>, seller_id: Uuid) -> Result<Option<i32>> {
    let duration = sqlx::query_scalar::<_, Option<i32>>(
        r#"
        SELECT consultation_duration
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(seller_id)
    .fetch_optional(pool)
    .await?;

    Ok(duration.flatten())
}

pub async fn set_consultation_duration(
    pool: &Pool<Postgres>,
    seller_id: Uuid,
    minutes: i32,
) -> Result<()> {
    tracing::debug!("Setting consultation duration: seller_id={}, minutes={}", seller_id, minutes);

    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET consultation_duration = $2
        WHERE id = $1
        "#,
    )
    .bind(seller_id)
    .bind(minutes)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre!("Profile {} not found", seller_id));
    }
    Ok(())
}

pub async fn get_profiles_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbProfile>> {
    let profiles = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, display_name, email, avatar_url, consultation_duration
        FROM profiles
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}
