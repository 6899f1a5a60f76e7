//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::EventNotFound
            | Self::BookingNotFound
            | Self::PaymentNotFound
            | Self::TicketNotFound
            | Self::CheckInNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (state conflicts and duplicate-action guards)
            Self::AlreadyExists
            | Self::BookingInvalidState
            | Self::BookingNotCancellable
            | Self::PaymentAlreadyInitiated
            | Self::PaymentAlreadyProcessed
            | Self::AlreadyCheckedIn => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError
            | Self::TimeoutError
            | Self::GatewayOrderFailed
            | Self::ChannelUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::TemplateNotFound
            | Self::DispatchFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors,
            // including inventory and sale-window rejections)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mapping() {
        assert_eq!(
            ErrorCode::BookingNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::EventNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_mapping() {
        assert_eq!(
            ErrorCode::PaymentAlreadyInitiated.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::PaymentAlreadyProcessed.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::BookingInvalidState.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_auth_mapping() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ErrorCode::RoleRequired.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_business_errors_are_bad_request() {
        assert_eq!(
            ErrorCode::InventoryExhausted.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::OutOfSaleWindow.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidSignature.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::MaxPerUserExceeded.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_retryable_mapping() {
        assert_eq!(
            ErrorCode::GatewayOrderFailed.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::TimeoutError.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
