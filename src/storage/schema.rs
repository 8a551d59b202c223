//! SQLite connection and schema management

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Binding store backed by a single `user_bindings` table.
pub struct SqliteBindingStore {
    pub(crate) conn: Connection,
}

impl SqliteBindingStore {
    /// Open (or create) the database at `path` and ensure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening binding database {}", path.display()))?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS user_bindings (
                    chat_user TEXT PRIMARY KEY,
                    username TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                [],
            )
            .context("creating user_bindings table")?;
        Ok(())
    }
}
