//! Domain layer: identifiers, events and bookings, and the event bus.
//!
//! This module contains the storage-independent model of the booking
//! system: the bookable [`Event`], the [`Booking`] rows held against it,
//! and the [`BookingEvent`] notifications broadcast after each commit.

pub mod booking_event;
pub mod event;
pub mod event_bus;
pub mod ids;

pub use booking_event::BookingEvent;
pub use event::{Booking, BookingReceipt, Event};
pub use event_bus::EventBus;
pub use ids::{EventId, UserId};
