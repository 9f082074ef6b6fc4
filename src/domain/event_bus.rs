//! Broadcast channel for domain events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every committed
//! booking mutation publishes a [`BookingEvent`] through the bus, and all
//! WebSocket connections subscribe to receive filtered events.

use tokio::sync::broadcast;

use super::BookingEvent;

/// Broadcast bus for [`BookingEvent`]s.
///
/// Backed by a `tokio::broadcast` channel whose capacity comes from
/// `EVENT_BUS_CAPACITY`. Lagging receivers lose the oldest notifications;
/// the store remains the source of truth for inventory.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BookingEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    /// If there are no active receivers, the event is silently dropped.
    pub fn publish(&self, event: BookingEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future events.
    ///
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BookingEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventId, UserId};
    use chrono::Utc;

    fn make_event(event_id: EventId) -> BookingEvent {
        BookingEvent::TicketBooked {
            event_id,
            user_id: UserId::new(101),
            available_tickets: 4,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(100);
        let count = bus.publish(make_event(EventId::new(1)));
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn subscriber_receives_event() {
        let bus = EventBus::new(100);
        let mut rx = bus.subscribe();

        let id = EventId::new(2);
        bus.publish(make_event(id));

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected to receive event");
        };
        assert_eq!(event.event_id(), id);
    }

    #[tokio::test]
    async fn late_subscriber_only_sees_later_events() {
        let bus = EventBus::new(100);
        let mut early = bus.subscribe();
        bus.publish(make_event(EventId::new(1)));

        let mut late = bus.subscribe();
        bus.publish(make_event(EventId::new(2)));

        let Ok(first) = early.recv().await else {
            panic!("early receiver failed");
        };
        assert_eq!(first.event_id(), EventId::new(1));

        let Ok(only) = late.recv().await else {
            panic!("late receiver failed");
        };
        assert_eq!(only.event_id(), EventId::new(2));
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::new(100);
        assert_eq!(bus.receiver_count(), 0);

        let _rx1 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);

        let _rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        drop(_rx1);
        assert_eq!(bus.receiver_count(), 1);
    }
}
