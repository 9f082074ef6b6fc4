//! In-memory store with the same all-or-nothing contract as PostgreSQL.
//!
//! All operations are serialized behind one [`tokio::sync::Mutex`]. Each
//! mutation runs against a staged copy of the tables that replaces the
//! live tables only on commit; an early return simply drops the copy.
//! Fault injection hooks let tests exercise the connectivity and
//! serialization-conflict paths without a database.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::BookingStore;
use crate::domain::{Booking, Event, EventId, UserId};
use crate::error::BookingError;

#[derive(Debug, Clone, Default)]
struct Tables {
    last_event_id: i64,
    events: BTreeMap<EventId, Event>,
    bookings: BTreeMap<(EventId, UserId), DateTime<Utc>>,
}

impl Tables {
    fn event_mut(&mut self, event_id: EventId) -> Result<&mut Event, BookingError> {
        self.events
            .get_mut(&event_id)
            .ok_or(BookingError::EventNotFound(event_id))
    }
}

/// Process-local store for tests and demos.
///
/// Cloning yields another handle to the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    offline: Arc<AtomicBool>,
    conflict_on_next_commit: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with
    /// [`BookingError::Connectivity`] until set back to `false`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes the next mutating operation fail at commit time with
    /// [`BookingError::SerializationConflict`], discarding its changes.
    pub fn fail_next_commit(&self) {
        self.conflict_on_next_commit.store(true, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), BookingError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BookingError::Connectivity(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }

    /// Runs `op` against a staged copy and publishes it only on success.
    async fn transact<T>(
        &self,
        op: impl FnOnce(&mut Tables) -> Result<T, BookingError>,
    ) -> Result<T, BookingError> {
        self.ensure_online()?;
        let mut live = self.tables.lock().await;
        let mut staged = live.clone();
        let value = op(&mut staged)?;
        if self.conflict_on_next_commit.swap(false, Ordering::SeqCst) {
            return Err(BookingError::SerializationConflict(
                "could not serialize access due to concurrent update".to_string(),
            ));
        }
        *live = staged;
        Ok(value)
    }

    async fn read<T>(&self, op: impl FnOnce(&Tables) -> T) -> Result<T, BookingError> {
        self.ensure_online()?;
        let live = self.tables.lock().await;
        Ok(op(&live))
    }
}

impl BookingStore for InMemoryStore {
    async fn create_event(&self, name: &str, total_tickets: i32) -> Result<EventId, BookingError> {
        let name = name.to_string();
        self.transact(move |t| {
            // Mirrors the events CHECK constraint.
            if total_tickets < 0 {
                return Err(BookingError::Store(format!(
                    "total_tickets {total_tickets} violates check constraint"
                )));
            }
            t.last_event_id = t.last_event_id.saturating_add(1);
            let id = EventId::new(t.last_event_id);
            t.events.insert(
                id,
                Event {
                    id,
                    name,
                    total_tickets,
                    available_tickets: total_tickets,
                },
            );
            Ok(id)
        })
        .await
    }

    async fn get_event(&self, event_id: EventId) -> Result<Event, BookingError> {
        self.read(|t| t.events.get(&event_id).cloned())
            .await?
            .ok_or(BookingError::EventNotFound(event_id))
    }

    async fn list_events(&self) -> Result<Vec<Event>, BookingError> {
        self.read(|t| t.events.values().cloned().collect()).await
    }

    async fn list_bookings(&self, event_id: EventId) -> Result<Vec<Booking>, BookingError> {
        let bookings = self
            .read(|t| {
                if !t.events.contains_key(&event_id) {
                    return None;
                }
                let mut rows: Vec<Booking> = t
                    .bookings
                    .range((event_id, UserId::new(i64::MIN))..=(event_id, UserId::new(i64::MAX)))
                    .map(|(&(event_id, user_id), &booked_at)| Booking {
                        event_id,
                        user_id,
                        booked_at,
                    })
                    .collect();
                rows.sort_by_key(|b| (b.booked_at, b.user_id));
                Some(rows)
            })
            .await?;
        bookings.ok_or(BookingError::EventNotFound(event_id))
    }

    async fn book_ticket(&self, event_id: EventId, user_id: UserId) -> Result<i32, BookingError> {
        self.transact(|t| {
            if t.bookings.contains_key(&(event_id, user_id)) {
                return Err(BookingError::DuplicateBooking { event_id, user_id });
            }
            let event = t.event_mut(event_id)?;
            if event.available_tickets <= 0 {
                return Err(BookingError::InsufficientInventory(event_id));
            }
            event.available_tickets -= 1;
            let remaining = event.available_tickets;
            t.bookings.insert((event_id, user_id), Utc::now());
            Ok(remaining)
        })
        .await
    }

    async fn cancel_booking(&self, event_id: EventId, user_id: UserId) -> Result<i32, BookingError> {
        self.transact(|t| {
            if t.bookings.remove(&(event_id, user_id)).is_none() {
                return Err(BookingError::BookingNotFound { event_id, user_id });
            }
            let event = t.event_mut(event_id)?;
            event.available_tickets += 1;
            Ok(event.available_tickets)
        })
        .await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn event_with(store: &InMemoryStore, tickets: i32) -> EventId {
        let Ok(id) = store.create_event("Go Conference 2026", tickets).await else {
            panic!("event creation failed");
        };
        id
    }

    async fn available(store: &InMemoryStore, id: EventId) -> i32 {
        let Ok(event) = store.get_event(id).await else {
            panic!("event lookup failed");
        };
        event.available_tickets
    }

    #[tokio::test]
    async fn create_event_starts_with_full_inventory() {
        let store = InMemoryStore::new();
        let id = event_with(&store, 5).await;
        let Ok(event) = store.get_event(id).await else {
            panic!("event lookup failed");
        };
        assert_eq!(event.total_tickets, 5);
        assert_eq!(event.available_tickets, 5);
    }

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let store = InMemoryStore::new();
        let a = event_with(&store, 1).await;
        let b = event_with(&store, 1).await;
        assert!(a < b);
    }

    #[tokio::test]
    async fn duplicate_booking_leaves_inventory_unchanged() {
        let store = InMemoryStore::new();
        let id = event_with(&store, 5).await;
        let user = UserId::new(101);

        assert_eq!(store.book_ticket(id, user).await, Ok(4));
        assert_eq!(
            store.book_ticket(id, user).await,
            Err(BookingError::DuplicateBooking {
                event_id: id,
                user_id: user
            })
        );
        assert_eq!(available(&store, id).await, 4);
    }

    #[tokio::test]
    async fn sold_out_event_rejects_booking() {
        let store = InMemoryStore::new();
        let id = event_with(&store, 1).await;

        assert_eq!(store.book_ticket(id, UserId::new(1)).await, Ok(0));
        assert_eq!(
            store.book_ticket(id, UserId::new(2)).await,
            Err(BookingError::InsufficientInventory(id))
        );
        assert_eq!(available(&store, id).await, 0);
    }

    #[tokio::test]
    async fn zero_ticket_event_rejects_booking() {
        let store = InMemoryStore::new();
        let id = event_with(&store, 0).await;
        assert_eq!(
            store.book_ticket(id, UserId::new(1)).await,
            Err(BookingError::InsufficientInventory(id))
        );
    }

    #[tokio::test]
    async fn booking_unknown_event_fails() {
        let store = InMemoryStore::new();
        let missing = EventId::new(99);
        assert_eq!(
            store.book_ticket(missing, UserId::new(1)).await,
            Err(BookingError::EventNotFound(missing))
        );
    }

    #[tokio::test]
    async fn cancel_without_booking_is_not_found() {
        let store = InMemoryStore::new();
        let id = event_with(&store, 3).await;
        assert_eq!(
            store.cancel_booking(id, UserId::new(7)).await,
            Err(BookingError::BookingNotFound {
                event_id: id,
                user_id: UserId::new(7)
            })
        );
        assert_eq!(available(&store, id).await, 3);
    }

    #[tokio::test]
    async fn cancel_returns_ticket_and_allows_rebooking() {
        let store = InMemoryStore::new();
        let id = event_with(&store, 1).await;
        let user = UserId::new(101);

        assert_eq!(store.book_ticket(id, user).await, Ok(0));
        assert_eq!(store.cancel_booking(id, user).await, Ok(1));
        assert_eq!(store.book_ticket(id, user).await, Ok(0));
    }

    #[tokio::test]
    async fn failed_commit_discards_staged_changes() {
        let store = InMemoryStore::new();
        let id = event_with(&store, 2).await;

        store.fail_next_commit();
        let result = store.book_ticket(id, UserId::new(1)).await;
        assert!(matches!(result, Err(BookingError::SerializationConflict(_))));
        assert_eq!(available(&store, id).await, 2);

        let Ok(bookings) = store.list_bookings(id).await else {
            panic!("listing failed");
        };
        assert!(bookings.is_empty());
    }

    #[tokio::test]
    async fn offline_store_reports_connectivity() {
        let store = InMemoryStore::new();
        store.set_offline(true);
        let result = store.create_event("Offline", 1).await;
        assert!(matches!(result, Err(BookingError::Connectivity(_))));

        store.set_offline(false);
        assert!(store.create_event("Online", 1).await.is_ok());
    }

    #[tokio::test]
    async fn negative_inventory_is_rejected_like_the_schema() {
        let store = InMemoryStore::new();
        let result = store.create_event("Broken", -1).await;
        assert!(matches!(result, Err(BookingError::Store(_))));

        let Ok(events) = store.list_events().await else {
            panic!("listing failed");
        };
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn list_bookings_only_returns_the_event() {
        let store = InMemoryStore::new();
        let a = event_with(&store, 3).await;
        let b = event_with(&store, 3).await;
        let _ = store.book_ticket(a, UserId::new(1)).await;
        let _ = store.book_ticket(b, UserId::new(2)).await;
        let _ = store.book_ticket(a, UserId::new(3)).await;

        let Ok(rows) = store.list_bookings(a).await else {
            panic!("listing failed");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.event_id == a));
    }

    #[tokio::test]
    async fn concurrent_bookers_never_oversell() {
        let store = InMemoryStore::new();
        let id = event_with(&store, 3).await;

        let mut handles = Vec::new();
        for user in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.book_ticket(id, UserId::new(user)).await
            }));
        }

        let mut booked = 0;
        for handle in handles {
            let Ok(result) = handle.await else {
                panic!("task panicked");
            };
            match result {
                Ok(_) => booked += 1,
                Err(BookingError::InsufficientInventory(_)) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(booked, 3);
        assert_eq!(available(&store, id).await, 0);
    }
}
