//! Ticket model — the inventory ledger unit

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ticket type belonging to one event.
///
/// `quantity` / `sold_quantity` are the inventory ledger: the invariant
/// `0 <= sold_quantity <= quantity` holds at all times and is enforced by
/// guarded updates in the database layer (plus a table CHECK constraint).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ticket {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    /// Fixed-point price, never floating point
    pub price: Decimal,
    /// Capacity
    pub quantity: i32,
    /// Units reserved by non-cancelled bookings
    pub sold_quantity: i32,
    /// Per-user purchase limit for a single booking
    pub max_per_user: i32,
    /// Sale window (epoch millis)
    pub sale_start_at: i64,
    pub sale_end_at: i64,
    pub is_active: bool,
}

impl Ticket {
    /// Units still available for reservation
    pub fn remaining(&self) -> i32 {
        self.quantity - self.sold_quantity
    }

    /// Is the ticket on sale at `now` (epoch millis)?
    pub fn is_on_sale(&self, now: i64) -> bool {
        self.is_active && now >= self.sale_start_at && now <= self.sale_end_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn ticket() -> Ticket {
        Ticket {
            id: 1,
            event_id: 10,
            name: "General Admission".into(),
            price: Decimal::new(50000, 2),
            quantity: 100,
            sold_quantity: 40,
            max_per_user: 4,
            sale_start_at: 1_000,
            sale_end_at: 2_000,
            is_active: true,
        }
    }

    #[test]
    fn test_remaining() {
        let t = ticket();
        assert_eq!(t.remaining(), 60);
    }

    #[test]
    fn test_sale_window() {
        let t = ticket();
        assert!(t.is_on_sale(1_000));
        assert!(t.is_on_sale(1_500));
        assert!(t.is_on_sale(2_000));
        assert!(!t.is_on_sale(999));
        assert!(!t.is_on_sale(2_001));
    }

    #[test]
    fn test_inactive_never_on_sale() {
        let mut t = ticket();
        t.is_active = false;
        assert!(!t.is_on_sale(1_500));
    }
}
