//! Booking error types with HTTP status code mapping.
//!
//! [`BookingError`] is the closed set of failures the store and service can
//! report. Callers branch on the variant, never on the message text. Each
//! variant also maps to an HTTP status code and a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EventId, UserId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "user 101 already has a booking for event 1"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see the table on [`BookingError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Whether the caller may retry the same request unchanged.
    pub retryable: bool,
}

/// Failure of a store or booking operation.
///
/// Every variant is returned only after the active transaction has been
/// rolled back, so none of them leaves a partial write behind.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                   |
/// |-----------|-------------------|-------------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request               |
/// | 2000–2999 | Not Found         | 404 Not Found                 |
/// | 3000–3999 | Store             | 500 / 503                     |
/// | 4000–4999 | Booking rules     | 409 Conflict / 422            |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Store unreachable, or a transaction could not begin or commit.
    #[error("store connectivity error: {0}")]
    Connectivity(String),

    /// The user already holds a booking for the event.
    #[error("user {user_id} already has a booking for event {event_id}")]
    DuplicateBooking {
        /// Event that was requested.
        event_id: EventId,
        /// User that already holds a ticket.
        user_id: UserId,
    },

    /// The event has no tickets left.
    #[error("insufficient tickets available for event {0}")]
    InsufficientInventory(EventId),

    /// No booking exists for the pair being cancelled.
    #[error("no booking found for user {user_id} on event {event_id}")]
    BookingNotFound {
        /// Event named in the cancellation.
        event_id: EventId,
        /// User named in the cancellation.
        user_id: UserId,
    },

    /// The store aborted the transaction because a concurrent transaction
    /// conflicted with it.
    #[error("serialization conflict: {0}")]
    SerializationConflict(String),

    /// Event with the given id does not exist.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Request validation failed before reaching the store.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other store failure (constraint, protocol, decoding).
    #[error("store error: {0}")]
    Store(String),
}

impl BookingError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::EventNotFound(_) => 2001,
            Self::BookingNotFound { .. } => 2002,
            Self::Store(_) => 3001,
            Self::Connectivity(_) => 3002,
            Self::DuplicateBooking { .. } => 4001,
            Self::InsufficientInventory(_) => 4002,
            Self::SerializationConflict(_) => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) | Self::BookingNotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateBooking { .. } | Self::SerializationConflict(_) => StatusCode::CONFLICT,
            Self::InsufficientInventory(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` when retrying the same operation may succeed.
    ///
    /// The core never retries on its own; this only informs the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SerializationConflict(_) | Self::Connectivity(_))
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                retryable: self.is_retryable(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
