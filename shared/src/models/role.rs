//! Event-scoped staff roles

use serde::{Deserialize, Serialize};

/// Staff role on a specific event.
///
/// Authorization is a capability-set lookup against the event's role
/// assignments, not a hierarchy: a check passes when the user holds any of
/// the accepted roles for that event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventRole {
    Organizer,
    Manager,
    Volunteer,
}

impl EventRole {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "ORGANIZER" => Some(Self::Organizer),
            "MANAGER" => Some(Self::Manager),
            "VOLUNTEER" => Some(Self::Volunteer),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Organizer => "ORGANIZER",
            Self::Manager => "MANAGER",
            Self::Volunteer => "VOLUNTEER",
        }
    }

    /// Roles allowed to operate the check-in desk
    pub const OPERATIONAL: [EventRole; 3] = [Self::Organizer, Self::Manager, Self::Volunteer];

    /// Roles allowed to mutate event/ticket setup
    pub const MANAGEMENT: [EventRole; 2] = [Self::Organizer, Self::Manager];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_db_roundtrip() {
        for role in [EventRole::Organizer, EventRole::Manager, EventRole::Volunteer] {
            assert_eq!(EventRole::from_db(role.as_db()), Some(role));
        }
        assert_eq!(EventRole::from_db("ADMIN"), None);
    }

    #[test]
    fn test_operational_set() {
        assert!(EventRole::OPERATIONAL.contains(&EventRole::Volunteer));
        assert!(!EventRole::MANAGEMENT.contains(&EventRole::Volunteer));
    }
}
