//! Payment model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment settlement status
///
/// PENDING → SUCCESS happens exactly once per payment; a payment never
/// leaves SUCCESS.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

/// Payment method accepted by the gateway
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Upi,
    NetBanking,
    Wallet,
}

impl PaymentMethod {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "CARD" => Some(Self::Card),
            "UPI" => Some(Self::Upi),
            "NET_BANKING" => Some(Self::NetBanking),
            "WALLET" => Some(Self::Wallet),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Card => "CARD",
            Self::Upi => "UPI",
            Self::NetBanking => "NET_BANKING",
            Self::Wallet => "WALLET",
        }
    }
}

/// Payment entity — at most one per booking (UNIQUE booking_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub amount: Decimal,
    /// ISO currency code, e.g. "EUR"
    pub currency: String,
    /// One of CARD / UPI / NET_BANKING / WALLET
    pub method: String,
    /// One of PENDING / SUCCESS / FAILED
    pub status: String,
    /// Order reference issued by the gateway at initiation
    pub gateway_order_id: String,
    /// Payment reference issued by the gateway on capture
    pub gateway_payment_id: Option<String>,
    pub paid_at: Option<i64>,
    pub created_at: i64,
}

impl Payment {
    /// Typed status accessor
    pub fn status(&self) -> Option<PaymentStatus> {
        PaymentStatus::from_db(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Success,
            PaymentStatus::Failed,
        ] {
            assert_eq!(PaymentStatus::from_db(status.as_db()), Some(status));
        }
    }

    #[test]
    fn test_method_db_roundtrip() {
        for method in [
            PaymentMethod::Card,
            PaymentMethod::Upi,
            PaymentMethod::NetBanking,
            PaymentMethod::Wallet,
        ] {
            assert_eq!(PaymentMethod::from_db(method.as_db()), Some(method));
        }
        assert_eq!(PaymentMethod::from_db("CASH"), None);
    }
}
