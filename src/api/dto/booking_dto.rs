//! Booking DTOs for book, cancel, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Booking, BookingReceipt, EventId, UserId};

/// Request body for `POST /events/:id/bookings`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookTicketRequest {
    /// User claiming the ticket.
    pub user_id: UserId,
}

/// Outcome status carried in a [`BookingReceiptResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// The ticket was booked.
    Booked,
    /// The booking was cancelled and the ticket returned.
    Cancelled,
}

/// Response body for a committed book or cancel.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingReceiptResponse {
    /// Event identifier.
    pub event_id: EventId,
    /// User identifier.
    pub user_id: UserId,
    /// Resulting booking state of the pair.
    pub status: BookingStatus,
    /// Inventory left on the event after commit.
    pub available_tickets: i32,
    /// Response timestamp.
    pub executed_at: DateTime<Utc>,
}

impl BookingReceiptResponse {
    /// Wraps a service receipt with its status.
    #[must_use]
    pub fn new(receipt: BookingReceipt, status: BookingStatus) -> Self {
        Self {
            event_id: receipt.event_id,
            user_id: receipt.user_id,
            status,
            available_tickets: receipt.available_tickets,
            executed_at: Utc::now(),
        }
    }
}

/// Response body for `GET /events/:id/bookings`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingListResponse {
    /// Event identifier.
    pub event_id: EventId,
    /// Active bookings ordered by booking time.
    pub data: Vec<Booking>,
}
