//! Link catalog: the durable, append-only record of handled agenda documents.
//!
//! The catalog is backed by a single SQLite table whose primary key is the
//! document URL. Inserts never overwrite: a second insert for the same URL
//! fails with [`CatalogError::Conflict`]. The pool is capped at one
//! connection, opened at the start of a run and closed at the end.

pub mod models;

pub use models::CatalogRecord;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The URL already has a record
    #[error("already catalogued: {url}")]
    Conflict { url: String },

    /// Connection or query failure
    #[error("catalog storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("catalog migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

pub struct LinkCatalog {
    pool: SqlitePool,
}

impl LinkCatalog {
    /// Open (creating if needed) the catalog at `database_url` and apply migrations.
    ///
    /// # Example URLs
    /// - `sqlite://council_meetings.db?mode=rwc` - file, created if missing
    /// - `sqlite::memory:` - ephemeral (tests)
    pub async fn open(database_url: &str) -> CatalogResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // One connection per run; an in-memory database lives only as long as it does
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Link catalog opened");

        Ok(Self { pool })
    }

    /// Create an in-memory catalog (for testing).
    pub async fn in_memory() -> CatalogResult<Self> {
        Self::open("sqlite::memory:").await
    }

    /// Release the connection. Called once at the end of every run.
    pub async fn close(self) {
        self.pool.close().await;
        debug!("Link catalog closed");
    }

    /// Whether `url` has already been handled.
    pub async fn contains(&self, url: &str) -> CatalogResult<bool> {
        let existing = sqlx::query_scalar::<_, String>(
            "SELECT url FROM council_meetings WHERE url = ?",
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(existing.is_some())
    }

    /// Append a record. Fails with `Conflict` if the URL is already present.
    pub async fn insert(&self, record: &CatalogRecord) -> CatalogResult<()> {
        let result = sqlx::query(
            "INSERT INTO council_meetings (timestamp, label, url, thread_url, summary)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.discovered_at)
        .bind(&record.label)
        .bind(&record.source_url)
        .bind(&record.thread_url)
        .bind(&record.summary_text)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(CatalogError::Conflict {
                url: record.source_url.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find(&self, url: &str) -> CatalogResult<Option<CatalogRecord>> {
        let record = sqlx::query_as::<_, CatalogRecord>(
            "SELECT timestamp, label, url, thread_url, summary
             FROM council_meetings WHERE url = ?",
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn count(&self) -> CatalogResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM council_meetings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        // 1555 = SQLITE_CONSTRAINT_PRIMARYKEY, 2067 = SQLITE_CONSTRAINT_UNIQUE
        sqlx::Error::Database(db) => {
            db.is_unique_violation() || matches!(db.code().as_deref(), Some("1555") | Some("2067"))
        }
        _ => false,
    }
}
