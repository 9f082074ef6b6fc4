//! Event DTOs for create, get, and list operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{Event, EventId};
use crate::error::BookingError;

/// Request body for `POST /events`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Human-readable event name.
    pub name: String,
    /// Number of tickets on sale; also the initial inventory.
    pub total_tickets: i32,
}

impl CreateEventRequest {
    /// Rejects empty names and negative ticket counts.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidRequest`] describing the first
    /// invalid field.
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.name.trim().is_empty() {
            return Err(BookingError::InvalidRequest(
                "name must not be empty".to_string(),
            ));
        }
        if self.total_tickets < 0 {
            return Err(BookingError::InvalidRequest(format!(
                "total_tickets must be non-negative, got {}",
                self.total_tickets
            )));
        }
        Ok(())
    }
}

/// Event representation returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    /// Event identifier.
    pub event_id: EventId,
    /// Event name.
    pub name: String,
    /// Ticket count fixed at creation.
    pub total_tickets: i32,
    /// Tickets still available.
    pub available_tickets: i32,
    /// Tickets held by active bookings.
    pub booked_tickets: i32,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.id,
            booked_tickets: event.booked_tickets(),
            name: event.name,
            total_tickets: event.total_tickets,
            available_tickets: event.available_tickets,
        }
    }
}

/// Paginated list response for `GET /events`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    /// Events on this page.
    pub data: Vec<EventResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
