//! Bind and unbind chat users to default player names

use log::info;

use super::common::CommandContext;
use crate::{cli::types::ChatUserId, storage::BindingStore, R6sError, Result};

/// Store `username` as `user`'s default. Returns the previous binding.
pub fn bind(store: &mut dyn BindingStore, user: &ChatUserId, username: &str) -> Result<Option<String>> {
    let username = username.trim();
    if username.is_empty() {
        return Err(R6sError::Config {
            message: "cannot bind an empty player name".to_string(),
        });
    }
    let previous = store.get(user)?;
    store.set(user, username)?;
    info!("bound chat user {user} to {username}");
    Ok(previous)
}

pub fn unbind(store: &mut dyn BindingStore, user: &ChatUserId) -> Result<bool> {
    let removed = store.delete(user)?;
    if removed {
        info!("removed binding for chat user {user}");
    }
    Ok(removed)
}

/// Handle the bind command
pub fn handle_bind(ctx: &CommandContext, user: ChatUserId, username: String) -> Result<()> {
    let mut store = ctx.binding_store()?;
    match bind(store.as_mut(), &user, &username)? {
        Some(previous) if previous != username.trim() => {
            println!("✓ {user} now looks up {} (was {previous})", username.trim())
        }
        _ => println!("✓ {user} now looks up {}", username.trim()),
    }
    Ok(())
}

/// Handle the unbind command
pub fn handle_unbind(ctx: &CommandContext, user: ChatUserId) -> Result<()> {
    let mut store = ctx.binding_store()?;
    if unbind(store.as_mut(), &user)? {
        println!("✓ Binding for {user} removed");
    } else {
        println!("No binding for {user}");
    }
    Ok(())
}
