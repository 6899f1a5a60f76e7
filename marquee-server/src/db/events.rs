use shared::models::Event;
use sqlx::PgPool;

const COLUMNS: &str =
    "id, organizer_id, name, venue, start_at, end_at, status, max_attendees, created_at, updated_at";

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(&format!("SELECT {COLUMNS} FROM events WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Published events starting inside `(from, to]` (epoch millis).
///
/// Used by the reminder scan: `to = now + window offset` picks up events
/// whose reminder window has opened.
pub async fn find_published_starting_between(
    pool: &PgPool,
    from: i64,
    to: i64,
) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(&format!(
        "SELECT {COLUMNS} FROM events
         WHERE status = 'PUBLISHED' AND start_at > $1 AND start_at <= $2
         ORDER BY start_at"
    ))
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}
