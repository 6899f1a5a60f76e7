use rust_decimal::Decimal;
use shared::models::Payment;
use sqlx::{PgConnection, PgPool};

const COLUMNS: &str = "id, booking_id, amount, currency, method, status, gateway_order_id, \
                       gateway_payment_id, paid_at, created_at";

pub struct CreatePayment<'a> {
    pub id: i64,
    pub booking_id: i64,
    pub amount: Decimal,
    pub currency: &'a str,
    pub method: &'a str,
    pub gateway_order_id: &'a str,
    pub now: i64,
}

/// Insert a PENDING payment. The UNIQUE booking_id constraint enforces the
/// 1:1 booking↔payment rule; a conflicting insert affects zero rows, which
/// the caller maps to PaymentAlreadyInitiated.
pub async fn insert_pending(pool: &PgPool, p: &CreatePayment<'_>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO payments (id, booking_id, amount, currency, method, status,
            gateway_order_id, created_at)
         VALUES ($1, $2, $3, $4, $5, 'PENDING', $6, $7)
         ON CONFLICT (booking_id) DO NOTHING",
    )
    .bind(p.id)
    .bind(p.booking_id)
    .bind(p.amount)
    .bind(p.currency)
    .bind(p.method)
    .bind(p.gateway_order_id)
    .bind(p.now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_order_id(
    pool: &PgPool,
    gateway_order_id: &str,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "SELECT {COLUMNS} FROM payments WHERE gateway_order_id = $1"
    ))
    .bind(gateway_order_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_booking(
    pool: &PgPool,
    booking_id: i64,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "SELECT {COLUMNS} FROM payments WHERE booking_id = $1"
    ))
    .bind(booking_id)
    .fetch_optional(pool)
    .await
}

/// Guarded PENDING → SUCCESS capture. Returns affected row count; zero
/// means the payment was already captured (or failed) — the replay guard.
pub async fn mark_success(
    conn: &mut PgConnection,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE payments SET status = 'SUCCESS', gateway_payment_id = $2, paid_at = $3
         WHERE gateway_order_id = $1 AND status = 'PENDING'",
    )
    .bind(gateway_order_id)
    .bind(gateway_payment_id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}
