//! Event handlers: create, list, get.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreateEventRequest, EventListResponse, EventResponse, PaginationParams};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{BookingError, ErrorResponse};
use crate::persistence::BookingStore;

/// `POST /events` — Create a new event.
///
/// # Errors
///
/// Returns [`BookingError::InvalidRequest`] for an empty name or a negative
/// ticket count, or a store error if the insert fails.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an event whose available ticket count starts equal to its total.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn create_event<S: BookingStore>(
    State(state): State<AppState<S>>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, BookingError> {
    req.validate()?;

    let event_id = state
        .booking_service
        .create_event(&req.name, req.total_tickets)
        .await?;

    let response = EventResponse {
        event_id,
        name: req.name,
        total_tickets: req.total_tickets,
        available_tickets: req.total_tickets,
        booked_tickets: 0,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /events` — List events with pagination.
///
/// # Errors
///
/// Returns a [`BookingError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns a paginated list of events ordered by id.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated event list", body = EventListResponse),
    )
)]
pub async fn list_events<S: BookingStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, BookingError> {
    let events = state.booking_service.list_events().await?;
    let (page, pagination) = params.paginate(events);

    Ok(Json(EventListResponse {
        data: page.into_iter().map(EventResponse::from).collect(),
        pagination,
    }))
}

/// `GET /events/:id` — Get event details.
///
/// # Errors
///
/// Returns [`BookingError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event details",
    description = "Returns the ticket totals and current inventory of one event.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event<S: BookingStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, BookingError> {
    let event = state.booking_service.get_event(EventId::new(id)).await?;
    Ok(Json(EventResponse::from(event)))
}

/// Event routes.
pub fn routes<S: BookingStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/events", get(list_events::<S>).post(create_event::<S>))
        .route("/events/{id}", get(get_event::<S>))
}
