//! REST endpoint handlers organized by resource.

pub mod bookings;
pub mod events;
pub mod system;

use axum::Router;

use crate::app_state::AppState;
use crate::persistence::BookingStore;

/// Composes all resource routes under `/api/v1`.
pub fn routes<S: BookingStore>() -> Router<AppState<S>> {
    Router::new()
        .merge(events::routes())
        .merge(bookings::routes())
}
