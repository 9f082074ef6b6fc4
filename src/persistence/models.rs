//! Database row shapes for the `events` and `bookings` tables.

use chrono::{DateTime, Utc};

use crate::domain::{Booking, Event, EventId, UserId};

/// Column tuple of `SELECT id, name, total_tickets, available_tickets`.
pub type EventRow = (i64, String, i32, i32);

/// Column tuple of `SELECT event_id, user_id, booked_at`.
pub type BookingRow = (i64, i64, DateTime<Utc>);

/// Converts an `events` row into the domain type.
#[must_use]
pub fn event_from_row((id, name, total_tickets, available_tickets): EventRow) -> Event {
    Event {
        id: EventId::new(id),
        name,
        total_tickets,
        available_tickets,
    }
}

/// Converts a `bookings` row into the domain type.
#[must_use]
pub fn booking_from_row((event_id, user_id, booked_at): BookingRow) -> Booking {
    Booking {
        event_id: EventId::new(event_id),
        user_id: UserId::new(user_id),
        booked_at,
    }
}
