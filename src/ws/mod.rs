//! WebSocket layer: connection handling and subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams committed booking activity
//! (event created, ticket booked, booking cancelled) to subscribed clients.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
