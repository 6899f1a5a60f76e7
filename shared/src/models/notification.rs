//! Notification model

use serde::{Deserialize, Serialize};

/// Delivery channel kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelKind {
    Email,
    Webhook,
}

impl ChannelKind {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "EMAIL" => Some(Self::Email),
            "WEBHOOK" => Some(Self::Webhook),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Webhook => "WEBHOOK",
        }
    }
}

/// Append-only record of one delivery attempt on one channel.
///
/// Never mutated after creation; `sent_at` is set on success, `error`
/// holds the failure reason otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    /// Domain event kind, e.g. "BOOKING_CONFIRMED"
    pub kind: String,
    /// One of EMAIL / WEBHOOK
    pub channel: String,
    pub title: String,
    pub body: String,
    pub sent_at: Option<i64>,
    pub error: Option<String>,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_db_roundtrip() {
        for kind in [ChannelKind::Email, ChannelKind::Webhook] {
            assert_eq!(ChannelKind::from_db(kind.as_db()), Some(kind));
        }
        assert_eq!(ChannelKind::from_db("SMS"), None);
    }
}
