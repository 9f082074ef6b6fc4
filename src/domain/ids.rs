//! Type-safe identifiers for events and users.
//!
//! Both are thin newtypes over the `BIGINT` columns in the store so that an
//! event id can never be passed where a user id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned identifier of an event row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a raw id as returned by the store.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Caller-supplied identifier of the user holding a booking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw user id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_integer() {
        assert_eq!(EventId::new(42).to_string(), "42");
        assert_eq!(UserId::new(101).to_string(), "101");
    }

    #[test]
    fn serializes_transparently() {
        let Ok(json) = serde_json::to_string(&EventId::new(7)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "7");

        let Ok(user) = serde_json::from_str::<UserId>("101") else {
            panic!("deserialization failed");
        };
        assert_eq!(user.get(), 101);
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(EventId::new(1) < EventId::new(2));
    }
}
