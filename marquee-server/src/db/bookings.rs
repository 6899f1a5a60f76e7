use rust_decimal::Decimal;
use shared::models::{Booking, BookingItem};
use sqlx::{PgConnection, PgPool};

const COLUMNS: &str = "id, booking_number, event_id, user_id, attendee_name, attendee_email, \
                       attendee_phone, quantity, total_amount, discount_amount, final_amount, \
                       status, confirmed_at, cancelled_at, created_at, updated_at";

pub struct CreateBooking<'a> {
    pub id: i64,
    pub booking_number: &'a str,
    pub event_id: i64,
    pub user_id: i64,
    pub attendee_name: &'a str,
    pub attendee_email: &'a str,
    pub attendee_phone: Option<&'a str>,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub now: i64,
}

pub async fn insert(conn: &mut PgConnection, b: &CreateBooking<'_>) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO bookings (id, booking_number, event_id, user_id, attendee_name,
            attendee_email, attendee_phone, quantity, total_amount, discount_amount,
            final_amount, status, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'PENDING', $12, $12)",
    )
    .bind(b.id)
    .bind(b.booking_number)
    .bind(b.event_id)
    .bind(b.user_id)
    .bind(b.attendee_name)
    .bind(b.attendee_email)
    .bind(b.attendee_phone)
    .bind(b.quantity)
    .bind(b.total_amount)
    .bind(b.discount_amount)
    .bind(b.final_amount)
    .bind(b.now)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn insert_item(
    conn: &mut PgConnection,
    booking_id: i64,
    ticket_id: i64,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO booking_items (booking_id, ticket_id, quantity, unit_price, total_price)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(booking_id)
    .bind(ticket_id)
    .bind(quantity)
    .bind(unit_price)
    .bind(total_price)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM bookings WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_number(pool: &PgPool, number: &str) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM bookings WHERE booking_number = $1"
    ))
    .bind(number)
    .fetch_optional(pool)
    .await
}

pub async fn find_items(pool: &PgPool, booking_id: i64) -> Result<Vec<BookingItem>, sqlx::Error> {
    sqlx::query_as::<_, BookingItem>(
        "SELECT id, booking_id, ticket_id, quantity, unit_price, total_price
         FROM booking_items WHERE booking_id = $1 ORDER BY id",
    )
    .bind(booking_id)
    .fetch_all(pool)
    .await
}

/// Line items read inside a transaction (cancellation release path)
pub async fn find_items_tx(
    conn: &mut PgConnection,
    booking_id: i64,
) -> Result<Vec<BookingItem>, sqlx::Error> {
    sqlx::query_as::<_, BookingItem>(
        "SELECT id, booking_id, ticket_id, quantity, unit_price, total_price
         FROM booking_items WHERE booking_id = $1 ORDER BY id",
    )
    .bind(booking_id)
    .fetch_all(conn)
    .await
}

/// Guarded PENDING → CONFIRMED transition. Returns affected row count.
pub async fn mark_confirmed(
    conn: &mut PgConnection,
    id: i64,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE bookings SET status = 'CONFIRMED', confirmed_at = $2, updated_at = $2
         WHERE id = $1 AND status = 'PENDING'",
    )
    .bind(id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

/// Guarded PENDING|CONFIRMED → CANCELLED transition. Returns affected row count.
pub async fn mark_cancelled(
    conn: &mut PgConnection,
    id: i64,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE bookings SET status = 'CANCELLED', cancelled_at = $2, updated_at = $2
         WHERE id = $1 AND status IN ('PENDING', 'CONFIRMED')",
    )
    .bind(id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

/// Guarded CONFIRMED → CHECKED_IN transition. Returns affected row count.
pub async fn mark_checked_in(
    conn: &mut PgConnection,
    id: i64,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE bookings SET status = 'CHECKED_IN', updated_at = $2
         WHERE id = $1 AND status = 'CONFIRMED'",
    )
    .bind(id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

/// Guarded PENDING → CANCELLED transition for the expiry reaper. Narrower
/// than [`mark_cancelled`]: a booking that got confirmed after being
/// selected must not be touched.
pub async fn mark_expired(
    conn: &mut PgConnection,
    id: i64,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE bookings SET status = 'CANCELLED', cancelled_at = $2, updated_at = $2
         WHERE id = $1 AND status = 'PENDING'",
    )
    .bind(id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

/// PENDING bookings created before `cutoff`, candidates for the reaper
pub async fn find_stale_pending(pool: &PgPool, cutoff: i64) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT id FROM bookings WHERE status = 'PENDING' AND created_at < $1 ORDER BY created_at",
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// Bookings that should receive event reminders
pub async fn find_attendees_for_event(
    pool: &PgPool,
    event_id: i64,
) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM bookings
         WHERE event_id = $1 AND status IN ('CONFIRMED', 'CHECKED_IN')
         ORDER BY id"
    ))
    .bind(event_id)
    .fetch_all(pool)
    .await
}
