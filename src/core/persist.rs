//! Key-value persistence for store collections
//!
//! The store serializes each collection to a JSON blob under a prefixed
//! key. The backing medium is behind the narrow `KeyValueStore` trait so
//! the store engine has no direct dependency on SQLite; tests use the
//! in-memory implementation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::core::entity::Entity;

/// Key prefix for all GeoComm blobs
pub const STORAGE_PREFIX: &str = "geocomm_";

/// Full storage key for a collection
pub fn collection_key(store_key: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, store_key)
}

/// Errors raised by persistence backends.
///
/// Callers that persist as a side effect of a mutation swallow these;
/// the in-memory store stays authoritative for the session.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write key '{key}': {reason}")]
    WriteFailed { key: String, reason: String },
}

/// Narrow persistence seam: load a blob, save a blob, clear by prefix.
pub trait KeyValueStore {
    /// Load the value stored under `key`, or None when absent.
    fn load(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Remove every key starting with `prefix`.
    fn clear(&self, prefix: &str) -> Result<(), PersistError>;
}

/// Load a collection blob through the seam; decode failures count as absent
/// so a corrupt blob falls back to seed data instead of failing startup.
pub fn load_collection<T: Entity>(kv: &dyn KeyValueStore) -> Option<Vec<T>> {
    let raw = kv.load(&collection_key(T::STORE_KEY))?;
    serde_json::from_str(&raw).ok()
}

/// Serialize and store a collection blob, best-effort: failures are
/// swallowed here, per the silent-fail persistence policy.
pub fn save_collection<T: Entity>(kv: &dyn KeyValueStore, items: &[T]) {
    if let Ok(json) = serde_json::to_string(items) {
        let _ = kv.save(&collection_key(T::STORE_KEY), &json);
    }
}

/// SQLite-backed key-value store: a single `kv` table in WAL mode.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path`, creating parent directories
    /// as needed.
    pub fn open(path: &Path) -> Result<Self, PersistError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PersistError::Unavailable(e.to_string()))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| PersistError::Unavailable(e.to_string()))?;

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| PersistError::Unavailable(e.to_string()))?;

        Ok(Self { conn })
    }

    /// Open an in-process database not backed by a file
    pub fn open_in_memory() -> Result<Self, PersistError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PersistError::Unavailable(e.to_string()))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
        )
        .map_err(|e| PersistError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn load(&self, key: &str) -> Option<String> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .ok()
            .flatten()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(|e| PersistError::WriteFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<(), PersistError> {
        self.conn
            .execute(
                "DELETE FROM kv WHERE key LIKE ?1 || '%'",
                params![prefix],
            )
            .map_err(|e| PersistError::WriteFailed {
                key: prefix.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// In-memory key-value store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    data: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a key, e.g. to simulate a previous session's state
    pub fn preload(&self, key: &str, value: &str) {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<(), PersistError> {
        self.data
            .borrow_mut()
            .retain(|k, _| !k.starts_with(prefix));
        Ok(())
    }
}
