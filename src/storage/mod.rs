//! Chat-user → default player name bindings.
//!
//! Two backends share the [`BindingStore`] trait:
//! - `json`: one JSON object on disk, rewritten whole on every change
//! - `schema`/`queries`: a single SQLite table
//!
//! Neither backend locks across processes; concurrent writers race and the
//! last one wins.

pub mod json;
pub mod queries;
pub mod schema;


use anyhow::Result;
use log::debug;

use crate::cli::types::ChatUserId;
use crate::config::{BindingBackend, Settings};

pub use json::JsonBindingStore;
pub use schema::SqliteBindingStore;

pub trait BindingStore {
    /// The player name bound to `user`, if any.
    fn get(&self, user: &ChatUserId) -> Result<Option<String>>;

    /// Bind `user` to `username`, replacing any earlier binding.
    fn set(&mut self, user: &ChatUserId, username: &str) -> Result<()>;

    /// Remove the binding. Returns whether one existed.
    fn delete(&mut self, user: &ChatUserId) -> Result<bool>;
}

/// Open the backend `settings` asks for at its default location.
pub fn open_binding_store(settings: &Settings) -> Result<Box<dyn BindingStore>> {
    let path = settings.bindings_path();
    debug!("opening {:?} binding store at {}", settings.bindings, path.display());
    Ok(match settings.bindings {
        BindingBackend::Json => Box::new(JsonBindingStore::new(path)),
        BindingBackend::Sqlite => Box::new(SqliteBindingStore::open(&path)?),
    })
}
