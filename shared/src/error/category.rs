//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the thousands digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Event errors
/// - 4xxx: Booking errors
/// - 5xxx: Payment errors
/// - 6xxx: Ticket / inventory errors
/// - 7xxx: Check-in errors
/// - 8xxx: Notification errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Event errors (3xxx)
    Event,
    /// Booking errors (4xxx)
    Booking,
    /// Payment errors (5xxx)
    Payment,
    /// Ticket / inventory errors (6xxx)
    Ticket,
    /// Check-in errors (7xxx)
    CheckIn,
    /// Notification errors (8xxx)
    Notification,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Event,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Ticket,
            7000..8000 => Self::CheckIn,
            8000..9000 => Self::Notification,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Event => "event",
            Self::Booking => "booking",
            Self::Payment => "payment",
            Self::Ticket => "ticket",
            Self::CheckIn => "check_in",
            Self::Notification => "notification",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Event);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Booking);
        assert_eq!(ErrorCategory::from_code(5004), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(6004), ErrorCategory::Ticket);
        assert_eq!(ErrorCategory::from_code(7002), ErrorCategory::CheckIn);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Notification);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::PermissionDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(ErrorCode::EventNotFound.category(), ErrorCategory::Event);
        assert_eq!(
            ErrorCode::BookingInvalidState.category(),
            ErrorCategory::Booking
        );
        assert_eq!(
            ErrorCode::InvalidSignature.category(),
            ErrorCategory::Payment
        );
        assert_eq!(
            ErrorCode::InventoryExhausted.category(),
            ErrorCategory::Ticket
        );
        assert_eq!(
            ErrorCode::AlreadyCheckedIn.category(),
            ErrorCategory::CheckIn
        );
        assert_eq!(
            ErrorCode::ChannelUnavailable.category(),
            ErrorCategory::Notification
        );
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::CheckIn).unwrap();
        assert_eq!(json, "\"check_in\"");

        let category: ErrorCategory = serde_json::from_str("\"payment\"").unwrap();
        assert_eq!(category, ErrorCategory::Payment);
    }
}
