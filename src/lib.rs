//! # ticket-booking
//!
//! Books tickets for events against PostgreSQL. Each book or cancel runs
//! as a single `SERIALIZABLE` transaction so that an event never sells
//! more tickets than it has and a user never holds two bookings for the
//! same event.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── BookingService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     └── BookingStore (persistence/)
//!           ├── PostgresStore   (serializable transactions)
//!           └── InMemoryStore   (tests)
//! ```
//!
//! The store handle is built once at startup and injected into the
//! service; nothing in the crate holds global mutable state.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;
use crate::persistence::BookingStore;

/// Builds the full application router (REST, health, and `/ws`) over the
/// given state.
pub fn build_app<S: BookingStore>(state: AppState<S>) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws::handler::ws_handler::<S>))
        .with_state(state)
}
