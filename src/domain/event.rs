//! Bookable events and the bookings held against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, UserId};

/// A bookable event with a fixed ticket total and a mutable inventory.
///
/// `available_tickets` always equals `total_tickets` minus the number of
/// active bookings, and stays within `0..=total_tickets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Human-readable event name.
    pub name: String,
    /// Ticket count fixed at creation.
    pub total_tickets: i32,
    /// Tickets not yet claimed by a booking.
    pub available_tickets: i32,
}

impl Event {
    /// Number of tickets currently held by active bookings.
    #[must_use]
    pub const fn booked_tickets(&self) -> i32 {
        self.total_tickets.saturating_sub(self.available_tickets)
    }

    /// Returns `true` when no tickets are left.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available_tickets <= 0
    }
}

/// An active claim by one user on one ticket of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    /// Event the ticket belongs to.
    pub event_id: EventId,
    /// User holding the ticket.
    pub user_id: UserId,
    /// Commit time of the booking.
    pub booked_at: DateTime<Utc>,
}

/// Outcome of a committed book or cancel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingReceipt {
    /// Event that was booked or released.
    pub event_id: EventId,
    /// User the operation applied to.
    pub user_id: UserId,
    /// Inventory left on the event after commit.
    pub available_tickets: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(total: i32, available: i32) -> Event {
        Event {
            id: EventId::new(1),
            name: "Go Conference 2026".to_string(),
            total_tickets: total,
            available_tickets: available,
        }
    }

    #[test]
    fn booked_tickets_is_total_minus_available() {
        assert_eq!(event(5, 4).booked_tickets(), 1);
        assert_eq!(event(5, 5).booked_tickets(), 0);
    }

    #[test]
    fn sold_out_at_zero() {
        assert!(event(1, 0).is_sold_out());
        assert!(!event(1, 1).is_sold_out());
    }
}
