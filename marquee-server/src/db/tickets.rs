//! Ticket inventory ledger
//!
//! `reserve` is the serialization point for concurrent bookings: the
//! availability predicate is re-evaluated under the row write lock when the
//! UPDATE executes, so two requests racing for the last unit cannot both
//! succeed regardless of what they read beforehand.

use shared::models::Ticket;
use sqlx::PgConnection;

const COLUMNS: &str = "id, event_id, name, price, quantity, sold_quantity, max_per_user, \
                       sale_start_at, sale_end_at, is_active";

pub async fn find_by_id(
    conn: &mut PgConnection,
    id: i64,
) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(&format!("SELECT {COLUMNS} FROM tickets WHERE id = $1"))
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Reserve `quantity` units. Returns false when the guarded predicate
/// fails, i.e. the remaining inventory is insufficient at commit time.
pub async fn reserve(
    conn: &mut PgConnection,
    ticket_id: i64,
    quantity: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tickets SET sold_quantity = sold_quantity + $2
         WHERE id = $1 AND sold_quantity + $2 <= quantity",
    )
    .bind(ticket_id)
    .bind(quantity)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Release `quantity` previously reserved units (cancellation path).
pub async fn release(
    conn: &mut PgConnection,
    ticket_id: i64,
    quantity: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tickets SET sold_quantity = sold_quantity - $2
         WHERE id = $1 AND sold_quantity >= $2",
    )
    .bind(ticket_id)
    .bind(quantity)
    .execute(conn)
    .await?;
    Ok(())
}
