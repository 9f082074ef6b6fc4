//! Booking service: runs store operations and emits events.

use chrono::Utc;

use crate::domain::{Booking, BookingEvent, BookingReceipt, Event, EventBus, EventId, UserId};
use crate::error::BookingError;
use crate::persistence::BookingStore;

/// Orchestration layer for all event and booking operations.
///
/// Owns the injected store handle and the [`EventBus`]. Every mutation
/// follows the pattern: run one store transaction → log the outcome →
/// publish an event only if the transaction committed → return.
/// Failures are returned untouched and never retried here.
#[derive(Debug)]
pub struct BookingService<S> {
    store: S,
    event_bus: EventBus,
}

impl<S: BookingStore> BookingService<S> {
    /// Creates a new `BookingService` over the given store.
    #[must_use]
    pub fn new(store: S, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the injected store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates an event whose inventory starts at `total_tickets`.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] if the store cannot complete the insert.
    pub async fn create_event(&self, name: &str, total_tickets: i32) -> Result<EventId, BookingError> {
        let event_id = self.store.create_event(name, total_tickets).await?;

        let _ = self.event_bus.publish(BookingEvent::EventCreated {
            event_id,
            name: name.to_string(),
            total_tickets,
            timestamp: Utc::now(),
        });

        tracing::info!(%event_id, name, total_tickets, "event created");
        Ok(event_id)
    }

    /// Loads a single event.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the event does not exist.
    pub async fn get_event(&self, event_id: EventId) -> Result<Event, BookingError> {
        self.store.get_event(event_id).await
    }

    /// Lists all events ordered by id.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] on store failure.
    pub async fn list_events(&self) -> Result<Vec<Event>, BookingError> {
        self.store.list_events().await
    }

    /// Lists the active bookings of an event.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the event does not exist.
    pub async fn list_bookings(&self, event_id: EventId) -> Result<Vec<Booking>, BookingError> {
        self.store.list_bookings(event_id).await
    }

    /// Books one ticket of `event_id` for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::DuplicateBooking`],
    /// [`BookingError::InsufficientInventory`] or
    /// [`BookingError::EventNotFound`] for rejected requests, and
    /// [`BookingError::SerializationConflict`] when a concurrent
    /// transaction won the race; the caller decides whether to retry.
    pub async fn book_ticket(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<BookingReceipt, BookingError> {
        let available_tickets = match self.store.book_ticket(event_id, user_id).await {
            Ok(available) => available,
            Err(err) => {
                log_rejection("book_ticket", event_id, user_id, &err);
                return Err(err);
            }
        };

        let _ = self.event_bus.publish(BookingEvent::TicketBooked {
            event_id,
            user_id,
            available_tickets,
            timestamp: Utc::now(),
        });

        tracing::info!(%event_id, %user_id, available_tickets, "ticket booked");
        Ok(BookingReceipt {
            event_id,
            user_id,
            available_tickets,
        })
    }

    /// Cancels the booking of `user_id` on `event_id`, returning its ticket
    /// to the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`] if the pair holds no
    /// booking, or a store error if the transaction fails.
    pub async fn cancel_booking(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<BookingReceipt, BookingError> {
        let available_tickets = match self.store.cancel_booking(event_id, user_id).await {
            Ok(available) => available,
            Err(err) => {
                log_rejection("cancel_booking", event_id, user_id, &err);
                return Err(err);
            }
        };

        let _ = self.event_bus.publish(BookingEvent::BookingCancelled {
            event_id,
            user_id,
            available_tickets,
            timestamp: Utc::now(),
        });

        tracing::info!(%event_id, %user_id, available_tickets, "booking cancelled");
        Ok(BookingReceipt {
            event_id,
            user_id,
            available_tickets,
        })
    }
}

/// Business-rule rejections are expected traffic; store faults are not.
fn log_rejection(op: &'static str, event_id: EventId, user_id: UserId, err: &BookingError) {
    match err {
        BookingError::DuplicateBooking { .. }
        | BookingError::InsufficientInventory(_)
        | BookingError::BookingNotFound { .. }
        | BookingError::EventNotFound(_) => {
            tracing::info!(op, %event_id, %user_id, reason = %err, "request rejected");
        }
        BookingError::SerializationConflict(_) => {
            tracing::warn!(op, %event_id, %user_id, error = %err, "transaction lost serialization race");
        }
        BookingError::Connectivity(_) | BookingError::Store(_) | BookingError::InvalidRequest(_) => {
            tracing::error!(op, %event_id, %user_id, error = %err, "transaction failed");
        }
    }
}
