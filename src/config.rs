//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Store connection parameters are read
//! once at startup and never consulted again by the booking core.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Store connection parameters.
    pub database: DatabaseConfig,

    /// Apply the embedded schema migrations on startup.
    pub run_migrations: bool,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,
}

/// PostgreSQL connection parameters.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Database host name.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Full connection URL; takes precedence over the individual fields.
    pub url_override: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Timeout in seconds for acquiring a connection.
    pub connect_timeout_secs: u64,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("url_override", &self.url_override.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl DatabaseConfig {
    /// Returns the connection options, built from the individual fields
    /// unless `DATABASE_URL` was set.
    ///
    /// Fields are passed as typed options, never spliced into a URL, so a
    /// password may contain any character.
    ///
    /// # Errors
    ///
    /// Returns [`sqlx::Error::Configuration`] if `DATABASE_URL` is not a
    /// valid PostgreSQL connection URL.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url_override {
            Some(url) => PgConnectOptions::from_str(url),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)
                .ssl_mode(PgSslMode::Disable)),
        }
    }

    /// Connection-acquire timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Reads the `DB_*` variables, falling back to local defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            host: env_or("DB_HOST", "localhost"),
            port: parse_env("DB_PORT", 5432),
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASSWORD", "postgres"),
            name: env_or("DB_NAME", "bookings"),
            url_override: std::env::var("DATABASE_URL").ok(),
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10),
            connect_timeout_secs: parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        if dotenvy::dotenv().is_err() {
            tracing::debug!(".env file not found, using process environment");
        }

        let listen_addr: SocketAddr = env_or("LISTEN_ADDR", "0.0.0.0:3000").parse()?;

        Ok(Self {
            listen_addr,
            database: DatabaseConfig::from_env(),
            run_migrations: parse_env_bool("RUN_MIGRATIONS", true),
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", 1_024),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
