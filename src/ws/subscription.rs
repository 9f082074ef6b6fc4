//! Per-connection subscription manager.
//!
//! Tracks which events a WebSocket client follows and provides
//! server-side filtering of booking notifications.

use std::collections::HashSet;

use super::messages::SubscriptionTarget;
use crate::domain::EventId;

/// Manages the set of event subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed event ids. Ignored while `subscribe_all` is set.
    event_ids: HashSet<EventId>,
    /// Whether the client follows every event (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds targets to the subscription set.
    pub fn subscribe(&mut self, targets: &[SubscriptionTarget]) {
        for target in targets {
            match *target {
                SubscriptionTarget::Event(id) => {
                    self.event_ids.insert(EventId::new(id));
                }
                SubscriptionTarget::Wildcard(_) => self.subscribe_all = true,
            }
        }
    }

    /// Removes targets from the subscription set. `"*"` clears the wildcard.
    pub fn unsubscribe(&mut self, targets: &[SubscriptionTarget]) {
        for target in targets {
            match *target {
                SubscriptionTarget::Event(id) => {
                    self.event_ids.remove(&EventId::new(id));
                }
                SubscriptionTarget::Wildcard(_) => self.subscribe_all = false,
            }
        }
    }

    /// Returns `true` if notifications about `event_id` should be forwarded.
    #[must_use]
    pub fn matches(&self, event_id: EventId) -> bool {
        self.subscribe_all || self.event_ids.contains(&event_id)
    }

    /// Returns the explicitly subscribed event ids in ascending order.
    #[must_use]
    pub fn event_ids(&self) -> Vec<EventId> {
        let mut ids: Vec<EventId> = self.event_ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
