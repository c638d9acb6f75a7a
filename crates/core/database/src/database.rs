use std::str::FromStr;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
};
use vohala_result::Result;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Handle to the embedded SQLite store.
///
/// All operations are async so a slow durable write never blocks presence
/// lookups or push delivery for unrelated connections.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) and migrate the database at the given path
    pub async fn open(path: &str) -> Result<Database> {
        info!("Opening database at {path}.");

        let options = SqliteConnectOptions::from_str(path)
            .map_err(|_| create_database_error!("connect", "database"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|_| create_database_error!("connect", "database"))?;

        Database::from_pool(pool).await
    }

    /// Open a fresh in-memory database, used by the test harnesses
    pub async fn open_in_memory() -> Result<Database> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|_| create_database_error!("connect", "database"))?
            .foreign_keys(true);

        // A single connection, otherwise every pooled connection would see
        // its own distinct in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|_| create_database_error!("connect", "database"))?;

        Database::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Database> {
        MIGRATOR
            .run(&pool)
            .await
            .map_err(|_| create_database_error!("migrate", "database"))?;

        Ok(Database { pool })
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
