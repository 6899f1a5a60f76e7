//! Check-in model

use serde::{Deserialize, Serialize};

/// How the attendee was identified at the gate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInMethod {
    Qr,
    Barcode,
    Manual,
}

impl CheckInMethod {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "QR" => Some(Self::Qr),
            "BARCODE" => Some(Self::Barcode),
            "MANUAL" => Some(Self::Manual),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Qr => "QR",
            Self::Barcode => "BARCODE",
            Self::Manual => "MANUAL",
        }
    }
}

/// Check-in record — at most one per booking (UNIQUE booking_id).
///
/// Created once; repeat check-in attempts return this record unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CheckIn {
    pub id: i64,
    pub booking_id: i64,
    /// One of QR / BARCODE / MANUAL
    pub method: String,
    /// Staff user who performed the check-in
    pub checked_in_by: i64,
    pub checked_in_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_db_roundtrip() {
        for method in [CheckInMethod::Qr, CheckInMethod::Barcode, CheckInMethod::Manual] {
            assert_eq!(CheckInMethod::from_db(method.as_db()), Some(method));
        }
        assert_eq!(CheckInMethod::from_db("NFC"), None);
    }
}
