//! Persistent cache layer on a SQLite key/value table.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};

use profiledeck_core::cache::{CacheError, PersistentLayer, Result};

use super::schema;

/// The slow layer of the cache store.
///
/// Survives process restarts. The connection sits behind a mutex so calls
/// are synchronous and serialized.
#[derive(Debug)]
pub struct SqliteLayer {
    conn: Mutex<Connection>,
}

impl SqliteLayer {
    /// Opens (or creates) the database file and ensures the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(map_sqlite_error)?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_error)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::CREATE_KV_STORE_TABLE)
            .map_err(map_sqlite_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistentLayer for SqliteLayer {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.conn()
            .query_row(schema::SELECT_VALUE, params![key], |row| row.get(0))
            .optional()
            .map_err(map_sqlite_error)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.conn()
            .execute(schema::UPSERT_VALUE, params![key, value])
            .map(|_| ())
            .map_err(map_sqlite_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn()
            .execute(schema::DELETE_KEY, params![key])
            .map(|_| ())
            .map_err(map_sqlite_error)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(schema::SELECT_KEYS).map_err(map_sqlite_error)?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(map_sqlite_error)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(map_sqlite_error)?;
        Ok(keys)
    }
}

/// Maps a rusqlite error to a CacheError.
///
/// - `SQLITE_FULL` → `CacheError::QuotaExceeded`
/// - `SQLITE_CANTOPEN` → `CacheError::Unavailable`
/// - All other errors → `CacheError::OperationFailed`
fn map_sqlite_error(err: rusqlite::Error) -> CacheError {
    match &err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::DiskFull =>
        {
            CacheError::QuotaExceeded
        }
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            CacheError::Unavailable(err.to_string())
        }
        _ => CacheError::OperationFailed(err.to_string()),
    }
}
