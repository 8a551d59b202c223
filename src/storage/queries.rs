//! Binding queries for the SQLite backend

use super::{schema::SqliteBindingStore, BindingStore};
use crate::cli::types::ChatUserId;
use anyhow::Result;
use rusqlite::{params, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};

impl SqliteBindingStore {
    /// Every binding, ordered by chat user id.
    pub fn all(&self) -> Result<Vec<(ChatUserId, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT chat_user, username FROM user_bindings ORDER BY chat_user")?;
        let rows = stmt.query_map([], |row| {
            Ok((ChatUserId::new(row.get::<_, String>(0)?), row.get(1)?))
        })?;

        let mut bindings = Vec::new();
        for row in rows {
            bindings.push(row?);
        }
        Ok(bindings)
    }
}

impl BindingStore for SqliteBindingStore {
    fn get(&self, user: &ChatUserId) -> Result<Option<String>> {
        let username = self
            .conn
            .query_row(
                "SELECT username FROM user_bindings WHERE chat_user = ?",
                params![user.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(username)
    }

    fn set(&mut self, user: &ChatUserId, username: &str) -> Result<()> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        self.conn.execute(
            "INSERT INTO user_bindings (chat_user, username, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(chat_user) DO UPDATE SET
                username = excluded.username,
                updated_at = excluded.updated_at",
            params![user.as_str(), username, now as i64],
        )?;
        Ok(())
    }

    fn delete(&mut self, user: &ChatUserId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM user_bindings WHERE chat_user = ?",
            params![user.as_str()],
        )?;
        Ok(rows_affected > 0)
    }
}
