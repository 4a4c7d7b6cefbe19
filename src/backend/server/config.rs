/**
 * Server Configuration
 *
 * This module handles loading of server configuration and the SQLite
 * connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (a `.env` file is
 * honoured by the binary), with defaults suitable for local development:
 *
 * | Variable             | Default                          |
 * |----------------------|----------------------------------|
 * | `DATABASE_URL`       | `sqlite://boardflow.db?mode=rwc` |
 * | `SERVER_PORT`        | `3000`                           |
 * | `DB_MAX_CONNECTIONS` | `5`                              |
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. The pool is
 * then `None` and data routes answer 503.
 */

use std::net::SocketAddr;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://boardflow.db?mode=rwc";

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Default pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database configuration result
///
/// Contains the connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<SqlitePool>;

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function
    ///
    /// Unparseable numbers fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Invalid SERVER_PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        "Invalid DB_MAX_CONNECTIONS '{}', using {}",
                        raw,
                        DEFAULT_MAX_CONNECTIONS
                    );
                    DEFAULT_MAX_CONNECTIONS
                }
            },
            None => defaults.max_connections,
        };

        Self {
            database_url,
            port,
            max_connections,
        }
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Open an SQLite pool with foreign keys enforced
///
/// Cascading deletes of boards and lists rely on `foreign_keys` being on for
/// every pooled connection.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Load and initialize the database connection pool
///
/// # Returns
///
/// - `Some(SqlitePool)` if the database is connected and migrated
/// - `None` if the connection or the migrations fail
pub async fn load_database(config: &ServerConfig) -> DatabaseConfig {
    tracing::info!("Connecting to database...");

    let pool = match connect(&config.database_url, config.max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Database features will be disabled.");
        return None;
    }
    tracing::info!("Database migrations completed successfully");

    Some(pool)
}

/// Single-connection in-memory pool with the schema applied
///
/// The connection is never recycled, otherwise the in-memory database would
/// vanish with it.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
