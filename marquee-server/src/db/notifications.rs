//! Append-only notification log

use sqlx::PgPool;

pub struct NewNotification<'a> {
    pub user_id: i64,
    pub kind: &'a str,
    pub channel: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    /// None records a successful delivery (`sent_at = now`)
    pub error: Option<&'a str>,
    pub now: i64,
}

pub async fn record(pool: &PgPool, n: &NewNotification<'_>) -> Result<(), sqlx::Error> {
    let sent_at = if n.error.is_none() { Some(n.now) } else { None };
    sqlx::query(
        "INSERT INTO notifications (user_id, kind, channel, title, body, sent_at, error, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(n.user_id)
    .bind(n.kind)
    .bind(n.channel)
    .bind(n.title)
    .bind(n.body)
    .bind(sent_at)
    .bind(n.error)
    .bind(n.now)
    .execute(pool)
    .await?;
    Ok(())
}
