//! Persistence layer: the event/booking store and its implementations.
//!
//! [`BookingStore`] is the seam between the booking service and the
//! relational store. Every mutating operation runs as one atomic unit: it
//! either commits in full or leaves the store untouched.
//!
//! - [`postgres::PostgresStore`] runs each booking operation in a
//!   `SERIALIZABLE` transaction over a `sqlx::PgPool`.
//! - [`memory::InMemoryStore`] stages each operation on a private copy and
//!   swaps it in on commit, for tests that need no database.

pub mod memory;
pub mod models;
pub mod postgres;

use std::future::Future;

use crate::domain::{Booking, Event, EventId, UserId};
use crate::error::BookingError;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Transactional access to events and bookings.
///
/// Implementations hold no transaction open between calls; each method
/// acquires what it needs and releases it before returning.
pub trait BookingStore: std::fmt::Debug + Send + Sync + 'static {
    /// Inserts an event whose inventory starts equal to `total_tickets`.
    ///
    /// `name` is not validated. A negative `total_tickets` breaks the
    /// inventory constraint and fails with [`BookingError::Store`].
    fn create_event(
        &self,
        name: &str,
        total_tickets: i32,
    ) -> impl Future<Output = Result<EventId, BookingError>> + Send;

    /// Loads a single event.
    fn get_event(
        &self,
        event_id: EventId,
    ) -> impl Future<Output = Result<Event, BookingError>> + Send;

    /// Lists all events ordered by id.
    fn list_events(&self) -> impl Future<Output = Result<Vec<Event>, BookingError>> + Send;

    /// Lists the active bookings of an event ordered by booking time.
    fn list_bookings(
        &self,
        event_id: EventId,
    ) -> impl Future<Output = Result<Vec<Booking>, BookingError>> + Send;

    /// Books one ticket for `user_id`, returning the remaining inventory.
    ///
    /// Fails with [`BookingError::DuplicateBooking`] if the pair is already
    /// booked and with [`BookingError::InsufficientInventory`] if no ticket
    /// is left. Neither failure changes the store.
    fn book_ticket(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> impl Future<Output = Result<i32, BookingError>> + Send;

    /// Removes the booking of `user_id` and returns its ticket to the
    /// inventory, returning the new available count.
    ///
    /// Fails with [`BookingError::BookingNotFound`] when there is nothing
    /// to cancel; inventory is then left unchanged.
    fn cancel_booking(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> impl Future<Output = Result<i32, BookingError>> + Send;
}
