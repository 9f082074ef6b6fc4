//! Service layer: business logic orchestration.
//!
//! [`BookingService`] runs the transactional store operations, logs their
//! outcome, and emits events through the [`super::domain::EventBus`].

pub mod booking_service;

pub use booking_service::BookingService;
