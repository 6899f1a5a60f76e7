//! Booking model and status state machine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Booking lifecycle status
///
/// ```text
/// PENDING --(payment verified)--> CONFIRMED --(checked in)--> CHECKED_IN
/// PENDING | CONFIRMED --(cancel)--> CANCELLED
/// ```
///
/// CANCELLED and CHECKED_IN are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    Cancelled,
}

impl BookingStatus {
    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "CHECKED_IN" => Some(Self::CheckedIn),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Database string representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::CheckedIn => "CHECKED_IN",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Is a transition to `next` legal?
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::CheckedIn)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// Can the booking still be cancelled?
    pub fn is_cancellable(&self) -> bool {
        self.can_transition_to(Self::Cancelled)
    }

    /// No transitions leave this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedIn | Self::Cancelled)
    }
}

/// Booking entity — one user's reservation for one event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    /// Human-readable unique reference, e.g. `MQ-1KTX9A40R`
    pub booking_number: String,
    pub event_id: i64,
    pub user_id: i64,
    pub attendee_name: String,
    pub attendee_email: String,
    pub attendee_phone: Option<String>,
    /// Sum of item quantities
    pub quantity: i32,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    /// Amount actually charged
    pub final_amount: Decimal,
    /// One of PENDING / CONFIRMED / CHECKED_IN / CANCELLED
    pub status: String,
    pub confirmed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Booking {
    /// Typed status accessor
    pub fn status(&self) -> Option<BookingStatus> {
        BookingStatus::from_db(&self.status)
    }
}

/// Booking line item — (booking, ticket) pairing with a price snapshot
///
/// `unit_price` is captured at booking time and stays fixed if the ticket
/// price changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingItem {
    pub id: i64,
    pub booking_id: i64,
    pub ticket_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::CheckedIn,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(BookingStatus::from_db("PAID"), None);
    }

    #[test]
    fn test_legal_transitions() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::CheckedIn));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        // No shortcut from pending to checked-in
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::CheckedIn));
        // Terminal states stay terminal
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Confirmed));
        assert!(!BookingStatus::CheckedIn.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::CheckedIn.can_transition_to(BookingStatus::Confirmed));
        // No self transitions
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn test_cancellable_and_terminal() {
        assert!(BookingStatus::Pending.is_cancellable());
        assert!(BookingStatus::Confirmed.is_cancellable());
        assert!(!BookingStatus::CheckedIn.is_cancellable());
        assert!(!BookingStatus::Cancelled.is_cancellable());

        assert!(BookingStatus::CheckedIn.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
    }
}
