//! Unified error codes for the Marquee platform
//!
//! Error codes are shared between the server and frontend clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Event errors
//! - 4xxx: Booking errors
//! - 5xxx: Payment errors
//! - 6xxx: Ticket / inventory errors
//! - 7xxx: Check-in errors
//! - 8xxx: Notification errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// An event-scoped staff role is required
    RoleRequired = 2002,

    // ==================== 3xxx: Event ====================
    /// Event not found
    EventNotFound = 3001,
    /// Event is not published (bookings only open on published events)
    EventNotPublished = 3002,
    /// Event has been cancelled
    EventCancelled = 3003,
    /// Event has already completed
    EventCompleted = 3004,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Action not valid for the booking's current status
    BookingInvalidState = 4002,
    /// Booking can no longer be cancelled
    BookingNotCancellable = 4003,
    /// Booking has no line items
    BookingEmpty = 4004,

    // ==================== 5xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// A payment has already been initiated for this booking
    PaymentAlreadyInitiated = 5002,
    /// Payment has already been captured
    PaymentAlreadyProcessed = 5003,
    /// Gateway signature verification failed
    InvalidSignature = 5004,
    /// Invalid payment method
    PaymentInvalidMethod = 5005,
    /// Gateway order creation failed (retryable)
    GatewayOrderFailed = 5006,

    // ==================== 6xxx: Ticket / Inventory ====================
    /// Ticket not found
    TicketNotFound = 6001,
    /// Ticket is not active
    TicketInactive = 6002,
    /// Ticket does not belong to the event
    TicketNotForEvent = 6003,
    /// Requested quantity exceeds remaining inventory
    InventoryExhausted = 6004,
    /// Current time is outside the ticket's sale window
    OutOfSaleWindow = 6005,
    /// Requested quantity exceeds the per-user limit
    MaxPerUserExceeded = 6006,

    // ==================== 7xxx: Check-in ====================
    /// Check-in record not found
    CheckInNotFound = 7001,
    /// Booking has already been checked in
    AlreadyCheckedIn = 7002,

    // ==================== 8xxx: Notification ====================
    /// Notification channel is not configured / unavailable
    ChannelUnavailable = 8001,
    /// No template registered for the domain event
    TemplateNotFound = 8002,
    /// Notification dispatch failed on all channels
    DispatchFailed = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "An event staff role is required",

            // Event
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::EventNotPublished => "Event is not published",
            ErrorCode::EventCancelled => "Event has been cancelled",
            ErrorCode::EventCompleted => "Event has already completed",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingInvalidState => "Action not valid for the booking's current status",
            ErrorCode::BookingNotCancellable => "Booking can no longer be cancelled",
            ErrorCode::BookingEmpty => "Booking has no line items",

            // Payment
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentAlreadyInitiated => "Payment has already been initiated",
            ErrorCode::PaymentAlreadyProcessed => "Payment has already been captured",
            ErrorCode::InvalidSignature => "Payment signature verification failed",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::GatewayOrderFailed => "Payment gateway order creation failed",

            // Ticket / Inventory
            ErrorCode::TicketNotFound => "Ticket not found",
            ErrorCode::TicketInactive => "Ticket is not active",
            ErrorCode::TicketNotForEvent => "Ticket does not belong to the event",
            ErrorCode::InventoryExhausted => "Requested quantity is no longer available",
            ErrorCode::OutOfSaleWindow => "Ticket is not on sale at this time",
            ErrorCode::MaxPerUserExceeded => "Requested quantity exceeds the per-user limit",

            // Check-in
            ErrorCode::CheckInNotFound => "Check-in record not found",
            ErrorCode::AlreadyCheckedIn => "Booking has already been checked in",

            // Notification
            ErrorCode::ChannelUnavailable => "Notification channel is unavailable",
            ErrorCode::TemplateNotFound => "No template for the domain event",
            ErrorCode::DispatchFailed => "Notification dispatch failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::RequiredField),
            7 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            // Event
            3001 => Ok(ErrorCode::EventNotFound),
            3002 => Ok(ErrorCode::EventNotPublished),
            3003 => Ok(ErrorCode::EventCancelled),
            3004 => Ok(ErrorCode::EventCompleted),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::BookingInvalidState),
            4003 => Ok(ErrorCode::BookingNotCancellable),
            4004 => Ok(ErrorCode::BookingEmpty),

            // Payment
            5001 => Ok(ErrorCode::PaymentNotFound),
            5002 => Ok(ErrorCode::PaymentAlreadyInitiated),
            5003 => Ok(ErrorCode::PaymentAlreadyProcessed),
            5004 => Ok(ErrorCode::InvalidSignature),
            5005 => Ok(ErrorCode::PaymentInvalidMethod),
            5006 => Ok(ErrorCode::GatewayOrderFailed),

            // Ticket / Inventory
            6001 => Ok(ErrorCode::TicketNotFound),
            6002 => Ok(ErrorCode::TicketInactive),
            6003 => Ok(ErrorCode::TicketNotForEvent),
            6004 => Ok(ErrorCode::InventoryExhausted),
            6005 => Ok(ErrorCode::OutOfSaleWindow),
            6006 => Ok(ErrorCode::MaxPerUserExceeded),

            // Check-in
            7001 => Ok(ErrorCode::CheckInNotFound),
            7002 => Ok(ErrorCode::AlreadyCheckedIn),

            // Notification
            8001 => Ok(ErrorCode::ChannelUnavailable),
            8002 => Ok(ErrorCode::TemplateNotFound),
            8003 => Ok(ErrorCode::DispatchFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::EventNotFound.code(), 3001);
        assert_eq!(ErrorCode::BookingNotFound.code(), 4001);
        assert_eq!(ErrorCode::BookingInvalidState.code(), 4002);
        assert_eq!(ErrorCode::PaymentAlreadyInitiated.code(), 5002);
        assert_eq!(ErrorCode::PaymentAlreadyProcessed.code(), 5003);
        assert_eq!(ErrorCode::InvalidSignature.code(), 5004);
        assert_eq!(ErrorCode::InventoryExhausted.code(), 6004);
        assert_eq!(ErrorCode::OutOfSaleWindow.code(), 6005);
        assert_eq!(ErrorCode::AlreadyCheckedIn.code(), 7002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::InventoryExhausted.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(4001), Ok(ErrorCode::BookingNotFound));
        assert_eq!(ErrorCode::try_from(5004), Ok(ErrorCode::InvalidSignature));
        assert_eq!(ErrorCode::try_from(6004), Ok(ErrorCode::InventoryExhausted));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::BookingNotFound).unwrap();
        assert_eq!(json, "4001");

        let json = serde_json::to_string(&ErrorCode::Success).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize_from_u16() {
        let code: ErrorCode = serde_json::from_str("6004").unwrap();
        assert_eq!(code, ErrorCode::InventoryExhausted);

        let result: Result<ErrorCode, _> = serde_json::from_str("1234");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::EventNotPublished,
            ErrorCode::PaymentAlreadyProcessed,
            ErrorCode::MaxPerUserExceeded,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::BookingNotFound.message(), "Booking not found");
        assert_eq!(
            ErrorCode::InventoryExhausted.message(),
            "Requested quantity is no longer available"
        );
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::BookingNotFound), "4001");
    }
}
