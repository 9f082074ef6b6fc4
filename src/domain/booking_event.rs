//! Domain events reflecting committed booking state changes.
//!
//! Every successful mutation emits a [`BookingEvent`] through the
//! [`super::EventBus`]. Events are published only after the store commit,
//! so subscribers never observe a change that was rolled back.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EventId, UserId};

/// Domain event emitted after every committed mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BookingEvent {
    /// Emitted when a new event is created.
    EventCreated {
        /// Event identifier.
        event_id: EventId,
        /// Event name.
        name: String,
        /// Ticket total (equal to the initial inventory).
        total_tickets: i32,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a ticket is booked.
    TicketBooked {
        /// Event identifier.
        event_id: EventId,
        /// User who booked.
        user_id: UserId,
        /// Inventory left after the booking.
        available_tickets: i32,
        /// Commit timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a booking is cancelled and its ticket returned.
    BookingCancelled {
        /// Event identifier.
        event_id: EventId,
        /// User whose booking was removed.
        user_id: UserId,
        /// Inventory left after the cancellation.
        available_tickets: i32,
        /// Commit timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl BookingEvent {
    /// Returns the event id this notification is about.
    #[must_use]
    pub fn event_id(&self) -> EventId {
        match self {
            Self::EventCreated { event_id, .. }
            | Self::TicketBooked { event_id, .. }
            | Self::BookingCancelled { event_id, .. } => *event_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::TicketBooked { .. } => "ticket_booked",
            Self::BookingCancelled { .. } => "booking_cancelled",
        }
    }
}
