//! Embedded schema migrations, applied at startup.
//!
//! The migration harness is synchronous, so it runs on a blocking thread
//! over an [`AsyncConnectionWrapper`] rather than holding up the runtime.

use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

/// Migrations embedded from `backend/migrations` at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error("failed to connect for migrations: {0}")]
    Connection(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Harness {
        /// Harness-supplied failure description.
        message: String,
    },
    /// The blocking migration task panicked or was cancelled.
    #[error("migration task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Apply any pending migrations against the given database.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn =
            AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Harness {
                message: err.to_string(),
            })?;
        if applied.is_empty() {
            info!("database schema is up to date");
        } else {
            info!(count = applied.len(), "applied pending migrations");
        }
        Ok(())
    })
    .await?
}
