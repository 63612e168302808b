use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::instrument;

/// `SQLITE_CONSTRAINT_UNIQUE`
pub const CODE_NON_UNIQUE: &str = "2067";

pub mod account;
pub mod message;

#[derive(Debug, Clone)]
#[must_use]
pub struct Repository {
    pub accounts: account::AccountRepository,
    pub messages: message::MessageRepository,
}

impl Repository {
    pub fn new(connection: SqlitePool) -> Self {
        let accounts = account::AccountRepository {
            connection: connection.clone(),
        };
        let messages = message::MessageRepository { connection };
        Self { accounts, messages }
    }

    /// Opens a pool on `database_url` and applies the embedded migrations.
    ///
    /// Pooled connections are never recycled, so `sqlite::memory:` with a
    /// single connection keeps its data for the lifetime of the pool.
    #[instrument(err(Debug))]
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .inspect_err(|error| tracing::error!(?error, "Migration failed"))?;

        tracing::info!("Database connected and migrated");
        Ok(Self::new(pool))
    }
}

#[must_use]
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(error) => error.code().is_some_and(|code| CODE_NON_UNIQUE == code),
        _ => false,
    }
}

#[cfg(test)]
pub(crate) async fn in_memory() -> Repository {
    Repository::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory database should open")
}
