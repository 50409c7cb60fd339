//! Database module for notekeeper
//!
//! Provides a hash-per-key store on top of SQLite. Each key owns a map of
//! field to value, mirroring the `HSET`/`HGETALL`/`HDEL` primitives of a
//! remote key-value server.

mod schema;

use schema::SCHEMA;

use rusqlite::{params, params_from_iter, Connection};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database connection poisoned")]
    Poisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
///
/// Cloning shares the same underlying connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }

    // ==================== Hash Operations ====================

    /// Set `field` to `value` in the hash stored at `key`
    ///
    /// Returns `true` when the field is new, `false` when an existing value
    /// was overwritten.
    pub fn hset(&self, key: &str, field: &str, value: &str) -> DbResult<bool> {
        let conn = self.lock()?;
        let existed: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM hashes WHERE key = ?1 AND field = ?2)",
            params![key, field],
            |row| row.get(0),
        )?;
        conn.execute(
            "INSERT INTO hashes (key, field, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(key, field) DO UPDATE SET value = excluded.value",
            params![key, field, value],
        )?;
        Ok(!existed)
    }

    /// Get every field and value of the hash stored at `key`
    ///
    /// A missing key yields an empty map.
    pub fn hgetall(&self, key: &str) -> DbResult<HashMap<String, String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT field, value FROM hashes WHERE key = ?1")?;
        let rows = stmt.query_map(params![key], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut entries = HashMap::new();
        for row in rows {
            let (field, value) = row?;
            entries.insert(field, value);
        }
        Ok(entries)
    }

    /// Remove `fields` from the hash stored at `key`
    ///
    /// Returns the number of fields actually removed; absent fields are
    /// skipped without error.
    pub fn hdel(&self, key: &str, fields: &[&str]) -> DbResult<usize> {
        if fields.is_empty() {
            return Ok(0);
        }
        let conn = self.lock()?;
        let placeholders = (0..fields.len())
            .map(|i| format!("?{}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("DELETE FROM hashes WHERE key = ?1 AND field IN ({placeholders})");
        let values = std::iter::once(key).chain(fields.iter().copied());
        let removed = conn.execute(&sql, params_from_iter(values))?;
        Ok(removed)
    }
}
