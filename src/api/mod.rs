//! REST API layer: route handlers, DTOs, router composition, and the
//! OpenAPI document.
//!
//! All resource endpoints are mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::persistence::BookingStore;

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "ticket-booking",
        description = "Transactional ticket booking: create events, book and cancel tickets."
    ),
    paths(
        handlers::events::create_event,
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::bookings::book_ticket,
        handlers::bookings::cancel_booking,
        handlers::bookings::list_bookings,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::CreateEventRequest,
        dto::EventResponse,
        dto::EventListResponse,
        dto::PaginationMeta,
        dto::BookTicketRequest,
        dto::BookingStatus,
        dto::BookingReceiptResponse,
        dto::BookingListResponse,
        crate::domain::Booking,
        crate::domain::EventId,
        crate::domain::UserId,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Events", description = "Event creation and inventory"),
        (name = "Bookings", description = "Serializable book and cancel operations"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router<S: BookingStore>() -> Router<AppState<S>> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}
