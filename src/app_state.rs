//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::BookingService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Generic over the store so the same router serves PostgreSQL in
/// production and the in-memory store in tests.
#[derive(Debug)]
pub struct AppState<S> {
    /// Booking service for all business logic.
    pub booking_service: Arc<BookingService<S>>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl<S> AppState<S> {
    /// Builds the state from a service, sharing its event bus.
    #[must_use]
    pub fn new(booking_service: Arc<BookingService<S>>, event_bus: EventBus) -> Self {
        Self {
            booking_service,
            event_bus,
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            booking_service: Arc::clone(&self.booking_service),
            event_bus: self.event_bus.clone(),
        }
    }
}
