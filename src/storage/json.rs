//! JSON file binding backend

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::BindingStore;
use crate::cli::types::ChatUserId;
use crate::core::{try_read_to_string, write_string};

/// Bindings kept as one `{chat_user: username}` object. Every change
/// rereads and rewrites the whole file.
pub struct JsonBindingStore {
    path: PathBuf,
}

impl JsonBindingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or empty file is an empty map; anything unparseable is an error.
    fn load(&self) -> Result<BTreeMap<String, String>> {
        match try_read_to_string(&self.path) {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .with_context(|| format!("parsing bindings file {}", self.path.display())),
            _ => Ok(BTreeMap::new()),
        }
    }

    fn store(&self, bindings: &BTreeMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(bindings)?;
        write_string(&self.path, &raw)
            .with_context(|| format!("writing bindings file {}", self.path.display()))
    }
}

impl BindingStore for JsonBindingStore {
    fn get(&self, user: &ChatUserId) -> Result<Option<String>> {
        Ok(self.load()?.remove(user.as_str()))
    }

    fn set(&mut self, user: &ChatUserId, username: &str) -> Result<()> {
        let mut bindings = self.load()?;
        bindings.insert(user.as_str().to_string(), username.to_string());
        self.store(&bindings)
    }

    fn delete(&mut self, user: &ChatUserId) -> Result<bool> {
        let mut bindings = self.load()?;
        let existed = bindings.remove(user.as_str()).is_some();
        if existed {
            self.store(&bindings)?;
        }
        Ok(existed)
    }
}
