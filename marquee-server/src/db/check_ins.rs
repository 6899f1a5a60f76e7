use shared::models::CheckIn;
use sqlx::{PgConnection, PgPool};

const COLUMNS: &str = "id, booking_id, method, checked_in_by, checked_in_at";

pub struct CreateCheckIn<'a> {
    pub id: i64,
    pub booking_id: i64,
    pub method: &'a str,
    pub checked_in_by: i64,
    pub now: i64,
}

pub async fn insert(conn: &mut PgConnection, c: &CreateCheckIn<'_>) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO check_ins (id, booking_id, method, checked_in_by, checked_in_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(c.id)
    .bind(c.booking_id)
    .bind(c.method)
    .bind(c.checked_in_by)
    .bind(c.now)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_booking(
    pool: &PgPool,
    booking_id: i64,
) -> Result<Option<CheckIn>, sqlx::Error> {
    sqlx::query_as::<_, CheckIn>(&format!(
        "SELECT {COLUMNS} FROM check_ins WHERE booking_id = $1"
    ))
    .bind(booking_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_for_event(pool: &PgPool, event_id: i64) -> Result<Vec<CheckIn>, sqlx::Error> {
    sqlx::query_as::<_, CheckIn>(
        "SELECT c.id, c.booking_id, c.method, c.checked_in_by, c.checked_in_at
         FROM check_ins c
         JOIN bookings b ON b.id = c.booking_id
         WHERE b.event_id = $1
         ORDER BY c.checked_in_at",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
}
