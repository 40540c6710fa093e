//! Persistence layer: connection pool, schema bootstrap, models and repositories.
//!
//! The pool is a `sqlx::AnyPool`, so one binary serves either SQLite (the
//! default, a local file) or PostgreSQL, chosen by the `DATABASE_URL` scheme.
//! Queries use `$N` placeholders, which both drivers accept.

use sqlx::any::AnyPoolOptions;

pub mod models;
pub mod repositories;
pub mod timestamp;

pub type DbPool = sqlx::AnyPool;

/// A single pooled connection, also what a transaction derefs to.
pub type DbConnection = sqlx::AnyConnection;

/// Connections kept by [`create_pool`].
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Pragmas applied to every new SQLite connection.
/// `busy_timeout` goes first so the others wait for locks too.
const SQLITE_PRAGMAS: &[&str] = &[
    "PRAGMA busy_timeout = 5000",
    "PRAGMA journal_mode = WAL",
    "PRAGMA foreign_keys = ON",
];

/// Idempotent DDL applied at startup. There is no migration history; tables
/// are created if absent and left alone otherwise. Timestamps are stored as
/// fixed-width RFC 3339 text (see [`timestamp`]) on both backends.
const SQLITE_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS projects (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        description TEXT,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_projects_name ON projects (name)",
];

const POSTGRES_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS projects (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_projects_name ON projects (name)",
];

/// The database engine behind a URL or connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    /// Pick the backend from a database URL scheme.
    pub fn from_url(database_url: &str) -> Result<Self, sqlx::Error> {
        let scheme = database_url.split(':').next().unwrap_or_default();
        match scheme {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            other => Err(sqlx::Error::Configuration(
                format!("unsupported database URL scheme {other:?}").into(),
            )),
        }
    }

    /// The backend an open connection talks to.
    pub fn of(conn: &DbConnection) -> Result<Self, sqlx::Error> {
        match conn.backend_name() {
            "SQLite" => Ok(Backend::Sqlite),
            "PostgreSQL" => Ok(Backend::Postgres),
            other => Err(sqlx::Error::Configuration(
                format!("unsupported database backend {other:?}").into(),
            )),
        }
    }

    fn schema(self) -> &'static [&'static str] {
        match self {
            Backend::Sqlite => SQLITE_SCHEMA,
            Backend::Postgres => POSTGRES_SCHEMA,
        }
    }
}

/// Create a connection pool from a database URL.
///
/// SQLite database files are created if they do not exist yet.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    let backend = Backend::from_url(database_url)?;
    let url = match backend {
        Backend::Sqlite => with_create_mode(database_url),
        Backend::Postgres => database_url.to_string(),
    };

    AnyPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                if backend == Backend::Sqlite {
                    for pragma in SQLITE_PRAGMAS {
                        sqlx::query(*pragma).execute(&mut *conn).await?;
                    }
                }
                Ok(())
            })
        })
        .connect(&url)
        .await
}

/// Ask SQLite to create the file (`mode=rwc`) unless the URL says otherwise.
fn with_create_mode(database_url: &str) -> String {
    if database_url.contains("mode=") || database_url.contains(":memory:") {
        return database_url.to_string();
    }
    let separator = if database_url.contains('?') { '&' } else { '?' };
    format!("{database_url}{separator}mode=rwc")
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create every table and index the application needs, if missing.
pub async fn create_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let backend = Backend::of(&conn)?;
    let schema = backend.schema();
    for statement in schema {
        sqlx::query(*statement).execute(&mut *conn).await?;
    }
    tracing::debug!(?backend, statements = schema.len(), "Schema bootstrap complete");
    Ok(())
}
