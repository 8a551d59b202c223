//! Resources shared by every command.

use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;

use crate::{
    config::Settings,
    core::{build_client, AssetCache},
    storage::{open_binding_store, BindingStore},
    Result,
};

/// Built once per process from [`Settings`].
pub struct CommandContext {
    pub settings: Settings,
    pub client: Client,
    pub assets: Arc<AssetCache>,
}

impl CommandContext {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = build_client(&settings)?;
        let assets = Arc::new(AssetCache::new(settings.assets_dir()));
        Ok(Self {
            settings,
            client,
            assets,
        })
    }

    pub fn binding_store(&self) -> Result<Box<dyn BindingStore>> {
        Ok(open_binding_store(&self.settings)?)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
