//! Reminder dispatch claims
//!
//! Claim first, send after: the insert is keyed on (event, booking, window
//! kind), so a rerun or overlapping scan affects zero rows and skips the
//! send. Same pattern as duplicate-webhook suppression.

use sqlx::PgPool;

/// Try to claim a reminder send. Returns true exactly once per key.
pub async fn claim(
    pool: &PgPool,
    event_id: i64,
    booking_id: i64,
    window_kind: &str,
    window_start: i64,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO reminder_dispatches (event_id, booking_id, window_kind, window_start, claimed_at)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT DO NOTHING",
    )
    .bind(event_id)
    .bind(booking_id)
    .bind(window_kind)
    .bind(window_start)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}
