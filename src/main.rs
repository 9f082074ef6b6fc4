//! ticket-booking server entry point.
//!
//! Connects to PostgreSQL, applies migrations, and starts the Axum HTTP
//! server with REST and WebSocket endpoints.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ticket_booking::app_state::AppState;
use ticket_booking::build_app;
use ticket_booking::config::AppConfig;
use ticket_booking::domain::EventBus;
use ticket_booking::persistence::PostgresStore;
use ticket_booking::service::BookingService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting ticket-booking");

    // Connect the store
    let store = PostgresStore::connect(&config.database).await?;
    if config.run_migrations {
        store.migrate().await?;
    }

    // Build service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let booking_service = Arc::new(BookingService::new(store, event_bus.clone()));
    let app_state = AppState::new(booking_service, event_bus);

    // Build router
    let app = build_app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ticket_booking::api::ApiDoc::openapi()),
        )
    };

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
