//! Event model

use serde::{Deserialize, Serialize};

/// Event lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Being set up by the organizer, not bookable
    Draft,
    /// Open for bookings
    Published,
    /// Cancelled by the organizer
    Cancelled,
    /// Past its end date
    Completed,
}

impl EventStatus {
    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(Self::Draft),
            "PUBLISHED" => Some(Self::Published),
            "CANCELLED" => Some(Self::Cancelled),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Database string representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Can tickets for this event be booked?
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Event entity
///
/// Written by the external event-management service; the settlement core
/// only reads it for booking validation and reminder fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Event {
    pub id: i64,
    pub organizer_id: i64,
    pub name: String,
    pub venue: Option<String>,
    /// Schedule window (epoch millis)
    pub start_at: i64,
    pub end_at: i64,
    /// One of DRAFT / PUBLISHED / CANCELLED / COMPLETED
    pub status: String,
    pub max_attendees: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Event {
    /// Typed status accessor
    pub fn status(&self) -> Option<EventStatus> {
        EventStatus::from_db(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in [
            EventStatus::Draft,
            EventStatus::Published,
            EventStatus::Cancelled,
            EventStatus::Completed,
        ] {
            assert_eq!(EventStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(EventStatus::from_db("bogus"), None);
    }

    #[test]
    fn test_only_published_is_bookable() {
        assert!(EventStatus::Published.is_bookable());
        assert!(!EventStatus::Draft.is_bookable());
        assert!(!EventStatus::Cancelled.is_bookable());
        assert!(!EventStatus::Completed.is_bookable());
    }
}
