//! Which adapter serves a lookup.

use std::sync::Arc;

use log::{debug, info};
use reqwest::Client;

use crate::cli::types::StatKind;
use crate::config::Settings;
use crate::core::AssetCache;
use crate::error::{R6sError, Result};
use crate::sources::{
    R6scnSource, SourceAdapter, StatsDbSource, TrackerSource, UbisoftSource,
};

pub type AdapterHandle = Arc<dyn SourceAdapter>;

/// Registered adapters in fallback order.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    adapters: Vec<AdapterHandle>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four shipped upstreams sharing one client.
    pub fn from_settings(settings: &Settings, client: &Client, assets: Option<Arc<AssetCache>>) -> Self {
        let mut tracker = TrackerSource::new(client.clone());
        let mut ubisoft = UbisoftSource::new(client.clone(), settings.session_file.clone());
        if let Some(assets) = assets {
            tracker = tracker.with_asset_cache(assets.clone());
            ubisoft = ubisoft.with_asset_cache(assets);
        }

        let mut registry = Self::new();
        registry.register(Arc::new(R6scnSource::new(client.clone())));
        registry.register(Arc::new(tracker));
        registry.register(Arc::new(StatsDbSource::new(
            client.clone(),
            settings.db_credentials.clone(),
        )));
        registry.register(Arc::new(ubisoft));
        registry
    }

    /// Add an adapter, replacing any registered under the same name in place.
    pub fn register(&mut self, adapter: AdapterHandle) {
        match self.adapters.iter_mut().find(|a| a.name() == adapter.name()) {
            Some(slot) => *slot = adapter,
            None => self.adapters.push(adapter),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub fn adapters(&self) -> &[AdapterHandle] {
        &self.adapters
    }

    pub fn get(&self, name: &str) -> Option<AdapterHandle> {
        let name = name.trim();
        self.adapters
            .iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// The override when given, otherwise the configured default.
    pub fn select(&self, default: &str, source_override: Option<&str>) -> Result<AdapterHandle> {
        let name = source_override.unwrap_or(default);
        self.get(name).ok_or_else(|| R6sError::InvalidSource {
            name: name.to_string(),
        })
    }

    /// Like [`select`](Self::select), but the adapter must be able to supply
    /// `kind`. An explicit override is never second-guessed; a default that
    /// cannot serve the kind falls back to the first registered adapter that
    /// can.
    pub fn select_for(
        &self,
        kind: StatKind,
        default: &str,
        source_override: Option<&str>,
    ) -> Result<AdapterHandle> {
        let selected = self.select(default, source_override)?;
        if selected.capabilities().supports(kind) {
            debug!("serving {kind} from {}", selected.name());
            return Ok(selected);
        }

        let unsupported = || R6sError::UnsupportedStatKind {
            source_name: selected.name().to_string(),
            kind: kind.to_string(),
        };
        if source_override.is_some() {
            return Err(unsupported());
        }

        match self.adapters.iter().find(|a| a.capabilities().supports(kind)) {
            Some(fallback) => {
                info!(
                    "{} cannot supply {kind} statistics, falling back to {}",
                    selected.name(),
                    fallback.name()
                );
                Ok(Arc::clone(fallback))
            }
            None => Err(unsupported()),
        }
    }
}

pub fn supports_operator_breakdown(handle: &AdapterHandle) -> bool {
    handle.capabilities().operator_breakdown
}

pub fn supports_recent_matches(handle: &AdapterHandle) -> bool {
    handle.capabilities().recent_matches
}
