//! PostgreSQL implementation of the booking store.
//!
//! Book and cancel each run inside one `SERIALIZABLE` transaction. The
//! isolation level is what stops two concurrent bookers from both reading
//! a positive inventory and both decrementing it: one of them is aborted
//! by PostgreSQL with SQLSTATE `40001` and reported as
//! [`BookingError::SerializationConflict`].

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use super::BookingStore;
use super::models::{BookingRow, EventRow, booking_from_row, event_from_row};
use crate::config::DatabaseConfig;
use crate::domain::{Booking, Event, EventId, UserId};
use crate::error::BookingError;

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
/// SQLSTATE class 08: connection exception.
const CONNECTION_EXCEPTION_CLASS: &str = "08";
/// SQLSTATE class 57P: operator intervention (admin shutdown, crash).
const OPERATOR_INTERVENTION_CLASS: &str = "57P";

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => match db.code().as_deref() {
                Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED) => {
                    Self::SerializationConflict(db.message().to_string())
                }
                Some(code)
                    if code.starts_with(CONNECTION_EXCEPTION_CLASS)
                        || code.starts_with(OPERATOR_INTERVENTION_CLASS) =>
                {
                    Self::Connectivity(err.to_string())
                }
                _ => Self::Store(err.to_string()),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connectivity(err.to_string()),
            _ => Self::Store(err.to_string()),
        }
    }
}

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and verifies the database answers.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Connectivity`] if the database cannot be
    /// reached within the configured timeout.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, BookingError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .connect_with(config.connect_options()?)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            "connected to PostgreSQL"
        );
        Ok(Self::new(pool))
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Store`] if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), BookingError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| BookingError::Store(format!("migration failed: {e}")))?;
        tracing::info!("schema migrations applied");
        Ok(())
    }

    /// Deletes every booking and event.
    ///
    /// Maintenance operation for demos and test fixtures; not part of the
    /// booking protocol.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] on database failure.
    pub async fn reset(&self) -> Result<(), BookingError> {
        let mut tx = self.pool.begin().await?;
        let bookings = sqlx::query("DELETE FROM bookings")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let events = sqlx::query("DELETE FROM events")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        tracing::info!(bookings, events, "store reset");
        Ok(())
    }

    /// Begins a transaction and raises it to `SERIALIZABLE`.
    async fn begin_serializable(&self) -> Result<Transaction<'static, Postgres>, BookingError> {
        let mut tx = self.pool.begin().await?;
        if let Err(err) = sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
        {
            rollback(tx, "begin").await;
            return Err(err.into());
        }
        Ok(tx)
    }
}

/// Commits on success and rolls back on failure, so every exit path of a
/// transactional operation ends the transaction explicitly.
async fn finish<T>(
    tx: Transaction<'static, Postgres>,
    outcome: Result<T, BookingError>,
    op: &'static str,
) -> Result<T, BookingError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            rollback(tx, op).await;
            Err(err)
        }
    }
}

async fn rollback(tx: Transaction<'static, Postgres>, op: &'static str) {
    // A failed rollback still discards the transaction server-side once the
    // connection is closed or reset by the pool.
    if let Err(err) = tx.rollback().await {
        tracing::warn!(op, error = %err, "rollback failed");
    }
}

async fn book_in_tx(
    conn: &mut PgConnection,
    event_id: EventId,
    user_id: UserId,
) -> Result<i32, BookingError> {
    let already_booked: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM bookings WHERE event_id = $1 AND user_id = $2)",
    )
    .bind(event_id.get())
    .bind(user_id.get())
    .fetch_one(&mut *conn)
    .await?;
    if already_booked {
        return Err(BookingError::DuplicateBooking { event_id, user_id });
    }

    let available: i32 =
        sqlx::query_scalar("SELECT available_tickets FROM events WHERE id = $1")
            .bind(event_id.get())
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(BookingError::EventNotFound(event_id))?;
    if available <= 0 {
        return Err(BookingError::InsufficientInventory(event_id));
    }

    let remaining: i32 = sqlx::query_scalar(
        "UPDATE events SET available_tickets = available_tickets - 1 \
         WHERE id = $1 RETURNING available_tickets",
    )
    .bind(event_id.get())
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("INSERT INTO bookings (event_id, user_id) VALUES ($1, $2)")
        .bind(event_id.get())
        .bind(user_id.get())
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                BookingError::DuplicateBooking { event_id, user_id }
            } else {
                BookingError::from(e)
            }
        })?;

    Ok(remaining)
}

async fn cancel_in_tx(
    conn: &mut PgConnection,
    event_id: EventId,
    user_id: UserId,
) -> Result<i32, BookingError> {
    let deleted = sqlx::query("DELETE FROM bookings WHERE event_id = $1 AND user_id = $2")
        .bind(event_id.get())
        .bind(user_id.get())
        .execute(&mut *conn)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Err(BookingError::BookingNotFound { event_id, user_id });
    }

    let remaining: i32 = sqlx::query_scalar(
        "UPDATE events SET available_tickets = available_tickets + 1 \
         WHERE id = $1 RETURNING available_tickets",
    )
    .bind(event_id.get())
    .fetch_one(&mut *conn)
    .await?;

    Ok(remaining)
}

impl BookingStore for PostgresStore {
    async fn create_event(&self, name: &str, total_tickets: i32) -> Result<EventId, BookingError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO events (name, total_tickets, available_tickets) \
             VALUES ($1, $2, $2) RETURNING id",
        )
        .bind(name)
        .bind(total_tickets)
        .fetch_one(&self.pool)
        .await?;

        Ok(EventId::new(id))
    }

    async fn get_event(&self, event_id: EventId) -> Result<Event, BookingError> {
        sqlx::query_as::<_, EventRow>(
            "SELECT id, name, total_tickets, available_tickets FROM events WHERE id = $1",
        )
        .bind(event_id.get())
        .fetch_optional(&self.pool)
        .await?
        .map(event_from_row)
        .ok_or(BookingError::EventNotFound(event_id))
    }

    async fn list_events(&self) -> Result<Vec<Event>, BookingError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, name, total_tickets, available_tickets FROM events ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(event_from_row).collect())
    }

    async fn list_bookings(&self, event_id: EventId) -> Result<Vec<Booking>, BookingError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(event_id.get())
            .fetch_one(&self.pool)
            .await?;
        if !exists {
            return Err(BookingError::EventNotFound(event_id));
        }

        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT event_id, user_id, booked_at FROM bookings \
             WHERE event_id = $1 ORDER BY booked_at, user_id",
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(booking_from_row).collect())
    }

    async fn book_ticket(&self, event_id: EventId, user_id: UserId) -> Result<i32, BookingError> {
        let mut tx = self.begin_serializable().await?;
        let outcome = book_in_tx(&mut tx, event_id, user_id).await;
        finish(tx, outcome, "book_ticket").await
    }

    async fn cancel_booking(&self, event_id: EventId, user_id: UserId) -> Result<i32, BookingError> {
        let mut tx = self.begin_serializable().await?;
        let outcome = cancel_in_tx(&mut tx, event_id, user_id).await;
        finish(tx, outcome, "cancel_booking").await
    }
}
