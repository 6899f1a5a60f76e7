//! Event-scoped role assignments (written by the external event service)

use shared::models::EventRole;
use sqlx::PgPool;

/// Capability-set query: does `user_id` hold any of `roles` on `event_id`?
pub async fn has_any_role(
    pool: &PgPool,
    user_id: i64,
    event_id: i64,
    roles: &[EventRole],
) -> Result<bool, sqlx::Error> {
    let role_names: Vec<String> = roles.iter().map(|r| r.as_db().to_string()).collect();
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM event_roles
         WHERE user_id = $1 AND event_id = $2 AND role = ANY($3)",
    )
    .bind(user_id)
    .bind(event_id)
    .bind(&role_names)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}
