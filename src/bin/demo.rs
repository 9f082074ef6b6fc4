//! Scripted walkthrough of the booking protocol against PostgreSQL.
//!
//! Resets the tables, creates an event with five tickets, then books,
//! re-books, and cancels for user 101, printing each outcome.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ticket_booking::config::AppConfig;
use ticket_booking::domain::{EventBus, UserId};
use ticket_booking::error::BookingError;
use ticket_booking::persistence::PostgresStore;
use ticket_booking::service::BookingService;

const DEMO_USER: UserId = UserId::new(101);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    let store = PostgresStore::connect(&config.database)
        .await
        .context("database connection failed")?;
    println!("--- Successfully connected to PostgreSQL ---");

    if config.run_migrations {
        store.migrate().await.context("migrations failed")?;
    }
    store.reset().await.context("failed to reset tables")?;

    let service = BookingService::new(store, EventBus::new(config.event_bus_capacity));

    let event_id = service
        .create_event("Go Conference 2026", 5)
        .await
        .context("failed to create event")?;
    println!("Step 1: Event created with ID {event_id}");

    println!("Step 2: Attempting to book ticket for user {DEMO_USER}...");
    match service.book_ticket(event_id, DEMO_USER).await {
        Ok(receipt) => println!(
            "Success: user {DEMO_USER} booked a ticket ({} left)",
            receipt.available_tickets
        ),
        Err(err) => println!("Error: {err}"),
    }

    println!("Step 3: Attempting duplicate booking for user {DEMO_USER}...");
    match service.book_ticket(event_id, DEMO_USER).await {
        Err(err @ BookingError::DuplicateBooking { .. }) => {
            println!("Caught expected error: {err}");
        }
        Err(err) => println!("Error: {err}"),
        Ok(_) => println!("Unexpected: duplicate booking was accepted"),
    }

    println!("Step 4: Attempting to cancel user {DEMO_USER}'s booking...");
    match service.cancel_booking(event_id, DEMO_USER).await {
        Ok(receipt) => println!(
            "Success: booking cancelled, ticket returned to pool ({} left)",
            receipt.available_tickets
        ),
        Err(err) => println!("Error: {err}"),
    }

    Ok(())
}
