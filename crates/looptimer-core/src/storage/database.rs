//! SQLite-backed key-value storage.
//!
//! The whole application state lives as one JSON document under
//! [`STATE_KEY`] in the `kv` table.

use std::path::Path;

use rusqlite::{params, Connection};

use super::{data_dir, StateStorage};
use crate::error::{Result, StorageError};

/// Key of the persisted store document.
pub const STATE_KEY: &str = "timer-storage";

/// SQLite database holding the persisted store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/looptimer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(data_dir()?.join("looptimer.db"))
    }

    /// Open (or create) a database file at `path`.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl StateStorage for Database {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.kv_get(STATE_KEY)?)
    }

    fn save(&self, payload: &str) -> Result<()> {
        Ok(self.kv_set(STATE_KEY, payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn state_storage_uses_state_key() {
        let db = Database::open_memory().unwrap();
        assert!(db.load().unwrap().is_none());
        db.save("{\"state\":{}}").unwrap();
        assert_eq!(db.kv_get(STATE_KEY).unwrap().as_deref(), Some("{\"state\":{}}"));
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("looptimer.db");
        Database::open_at(&path).unwrap().save("payload").unwrap();
        let reopened = Database::open_at(&path).unwrap();
        assert_eq!(reopened.load().unwrap().as_deref(), Some("payload"));
    }
}
