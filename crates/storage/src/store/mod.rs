#![forbid(unsafe_code)]

mod error;
mod schema;
mod status_log;
mod tasks;

pub use error::StoreError;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Single-connection SQLite store backing both the task registry and the status log.
///
/// The connection is released when the store is dropped; [`SqliteStore::close`]
/// does the same but reports close failures.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file, installs the schema and
    /// seeds the default tasks when the task table is empty.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        let mode = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        tracing::debug!(path = %db_path.display(), journal_mode = %mode, "opened sqlite database");

        Self::init(conn, Some(db_path))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None)
    }

    fn init(mut conn: Connection, db_path: Option<PathBuf>) -> Result<Self, StoreError> {
        schema::install_schema(&conn)?;
        let seeded = schema::seed_if_empty(&mut conn)?;
        if seeded > 0 {
            tracing::info!(tasks = seeded, "seeded default tasks");
        }
        Ok(Self { conn, db_path })
    }

    /// `None` for in-memory stores.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, err)| StoreError::Sql(err))
    }
}
