//! Community tracker site. The profile and seasons pages are HTML with
//! state embedded as `data: {...}` blocks; booleans are obfuscated as
//! `!46$`/`!47$` tokens.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::{Map, Value};

use super::{
    join_segments, status_error, trim_base_url, Capabilities, RawPayload, SourceAdapter, R6TRACKER,
};
use crate::cli::types::Platform;
use crate::core::cache::{AssetCache, AssetKind};
use crate::core::http::browser_header_map;
use crate::error::{R6sError, Result};

pub const TRACKER_BASE_URL: &str = "https://r6.tracker.network";
pub const MAIN_BLOCK_KEY: &str = "userMainData";
pub const SEASONS_BLOCK_KEY: &str = "userSeasonsData";
const BLOCK_MARKER: &str = "data: ";
/// Key the site puts in the main block when the profile does not exist.
const NOT_FOUND_MARKER: &str = "!15$_!6$s:!5$";
const FALSE_TOKEN: &str = "!46$";
const TRUE_TOKEN: &str = "!47$";

/// Decode every `data: {...}` block of `page` into `key -> data`.
///
/// Blocks that fail to decode or lack a string `key` are skipped. Text after
/// the first JSON value of a block (the rest of the script tag) is ignored.
pub fn parse_data_blocks(page: &str) -> Map<String, Value> {
    let mut blocks = Map::new();
    for chunk in page.split(BLOCK_MARKER).skip(1) {
        if !chunk.starts_with('{') {
            continue;
        }
        let chunk = chunk.replace(FALSE_TOKEN, "false").replace(TRUE_TOKEN, "true");
        let mut stream = serde_json::Deserializer::from_str(&chunk).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(mut block))) => {
                let key = block.get("key").and_then(Value::as_str).map(str::to_string);
                match key {
                    Some(key) => {
                        let data = block.remove("data").unwrap_or(Value::Null);
                        blocks.insert(key, data);
                    }
                    None => debug!("{R6TRACKER}: skipping data block without a key"),
                }
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => debug!("{R6TRACKER}: skipping undecodable data block: {e}"),
            None => {}
        }
    }
    blocks
}

fn main_block_is_missing(blocks: &Map<String, Value>) -> bool {
    match blocks.get(MAIN_BLOCK_KEY).and_then(Value::as_object) {
        Some(main) => main.is_empty() || main.contains_key(NOT_FOUND_MARKER),
        None => true,
    }
}

pub struct TrackerSource {
    client: Client,
    base_url: String,
    assets: Option<Arc<AssetCache>>,
}

impl TrackerSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: TRACKER_BASE_URL.to_string(),
            assets: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(url);
        self
    }

    /// Cache the profile avatar on every successful fetch.
    pub fn with_asset_cache(mut self, assets: Arc<AssetCache>) -> Self {
        self.assets = Some(assets);
        self
    }

    async fn fetch_page(&self, url: &str, identifier: &str) -> Result<String> {
        debug!("{R6TRACKER}: GET {url}");
        let response = self
            .client
            .get(url)
            .headers(browser_header_map())
            .send()
            .await
            .map_err(|e| R6sError::from_transport(R6TRACKER, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(R6TRACKER, status, identifier));
        }
        response
            .text()
            .await
            .map_err(|e| R6sError::from_transport(R6TRACKER, e))
    }

    async fn cache_avatar(&self, main: &Value, identifier: &str) {
        let Some(assets) = &self.assets else {
            return;
        };
        let Some(url) = main.get("avatarUrl").and_then(Value::as_str) else {
            return;
        };
        let name = main
            .get("profileId")
            .and_then(Value::as_str)
            .unwrap_or(identifier);
        if let Err(e) = assets
            .get_or_fetch(&self.client, AssetKind::Avatars, name, Some(url))
            .await
        {
            warn!("{R6TRACKER}: could not cache avatar for {identifier}: {e}");
        }
    }
}

#[async_trait]
impl SourceAdapter for TrackerSource {
    fn name(&self) -> &'static str {
        R6TRACKER
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    async fn fetch(&self, identifier: &str, platform: Option<Platform>) -> Result<RawPayload> {
        let platform = platform.unwrap_or_default();
        let segments = ["profile", platform.path_segment(), identifier, "seasons"];
        let profile_url = join_segments(R6TRACKER, &self.base_url, &segments[..3])?;
        let seasons_url = join_segments(R6TRACKER, &self.base_url, &segments)?;

        let (profile, seasons) = tokio::join!(
            self.fetch_page(profile_url.as_str(), identifier),
            self.fetch_page(seasons_url.as_str(), identifier)
        );
        let mut blocks = parse_data_blocks(&profile?);
        for (key, data) in parse_data_blocks(&seasons?) {
            blocks.entry(key).or_insert(data);
        }

        if main_block_is_missing(&blocks) {
            return Err(R6sError::NotFound {
                username: identifier.to_string(),
            });
        }

        if let Some(main) = blocks.get(MAIN_BLOCK_KEY) {
            self.cache_avatar(main, identifier).await;
        }

        Ok(RawPayload::new(
            R6TRACKER,
            identifier,
            platform,
            Value::Object(blocks),
        ))
    }
}
