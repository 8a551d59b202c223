//! Command implementations for the r6s-stats CLI

pub mod assets;
pub mod bind;
pub mod common;
pub mod lookup;
pub mod sources;


use log::debug;

use crate::{cli::types::ChatUserId, storage::BindingStore, Result};

/// Pick the player name for a lookup: an explicit name wins, then the chat
/// user's binding, then the configured default.
pub fn resolve_username(
    explicit: Option<&str>,
    chat_user: Option<&ChatUserId>,
    store: Option<&dyn BindingStore>,
    default_name: &str,
) -> Result<String> {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return Ok(name.to_string());
    }

    if let (Some(user), Some(store)) = (chat_user, store) {
        if let Some(bound) = store.get(user)? {
            debug!("using name bound to chat user {user}: {bound}");
            return Ok(bound);
        }
    }

    Ok(default_name.to_string())
}
