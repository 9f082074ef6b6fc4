//! Booking handlers: book, cancel, list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::api::dto::{
    BookTicketRequest, BookingListResponse, BookingReceiptResponse, BookingStatus,
};
use crate::app_state::AppState;
use crate::domain::{EventId, UserId};
use crate::error::{BookingError, ErrorResponse};
use crate::persistence::BookingStore;

/// `POST /events/:id/bookings` — Book one ticket for a user.
///
/// # Errors
///
/// Returns [`BookingError`] for duplicate bookings, sold-out events,
/// unknown events, and store or serialization failures.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/bookings",
    tag = "Bookings",
    summary = "Book a ticket",
    description = "Books one ticket in a serializable transaction. A 409 with `retryable: true` means a concurrent booking won the race and the request may be retried.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    request_body = BookTicketRequest,
    responses(
        (status = 201, description = "Ticket booked", body = BookingReceiptResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Duplicate booking or serialization conflict", body = ErrorResponse),
        (status = 422, description = "No tickets left", body = ErrorResponse),
    )
)]
pub async fn book_ticket<S: BookingStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(req): Json<BookTicketRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let receipt = state
        .booking_service
        .book_ticket(EventId::new(id), req.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingReceiptResponse::new(receipt, BookingStatus::Booked)),
    ))
}

/// `DELETE /events/:id/bookings/:user_id` — Cancel a booking.
///
/// # Errors
///
/// Returns [`BookingError::BookingNotFound`] if the user holds no booking
/// for the event, or a store error.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}/bookings/{user_id}",
    tag = "Bookings",
    summary = "Cancel a booking",
    description = "Deletes the booking and returns its ticket to the event inventory.",
    params(
        ("id" = i64, Path, description = "Event id"),
        ("user_id" = i64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingReceiptResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Serialization conflict", body = ErrorResponse),
    )
)]
pub async fn cancel_booking<S: BookingStore>(
    State(state): State<AppState<S>>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, BookingError> {
    let receipt = state
        .booking_service
        .cancel_booking(EventId::new(id), UserId::new(user_id))
        .await?;

    Ok(Json(BookingReceiptResponse::new(
        receipt,
        BookingStatus::Cancelled,
    )))
}

/// `GET /events/:id/bookings` — List active bookings of an event.
///
/// # Errors
///
/// Returns [`BookingError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/bookings",
    tag = "Bookings",
    summary = "List bookings",
    description = "Returns the active bookings of an event ordered by booking time.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Active bookings", body = BookingListResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_bookings<S: BookingStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, BookingError> {
    let event_id = EventId::new(id);
    let data = state.booking_service.list_bookings(event_id).await?;
    Ok(Json(BookingListResponse { event_id, data }))
}

/// Booking routes.
pub fn routes<S: BookingStore>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/events/{id}/bookings",
            get(list_bookings::<S>).post(book_ticket::<S>),
        )
        .route(
            "/events/{id}/bookings/{user_id}",
            delete(cancel_booking::<S>),
        )
}
