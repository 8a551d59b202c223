//! Official account API, using a session obtained elsewhere and persisted
//! to a JSON file.
//!
//! A lookup resolves the profile by name first and then fans out five
//! independent requests. A failed sub-request is logged and recorded as
//! `null`; only the profile lookup itself can fail the whole fetch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{status_error, trim_base_url, Capabilities, RawPayload, SourceAdapter, UBISOFT};
use crate::cli::types::Platform;
use crate::core::cache::{
    avatar_url, try_read_to_string, write_string, AssetCache, AssetKind, AVATAR_URL_TEMPLATE,
};
use crate::core::http::ubi_header_map;
use crate::error::{R6sError, Result};

pub const UBISOFT_BASE_URL: &str = "https://public-ubiservices.ubi.com";

const PC_SPACE_ID: &str = "5172a557-50b5-4665-b7db-e3f2e8c5041d";
const XBOX_SPACE_ID: &str = "98a601e5-ca91-4440-b1c5-753f601a2c90";
const PSN_SPACE_ID: &str = "05bfb3f7-6c21-4c42-be1f-97a33fb5cf66";
const PLAYTIME_STATS: &str = "PPvPTimePlayed,PClearanceLevel,PPvETimePlayed,PTotalTimePlayed";

/// Persisted account session. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    pub sessionid: String,
    pub key: String,
    pub new_key: String,
    pub spaceid: String,
    pub profileid: String,
    pub userid: String,
    pub expiration: String,
    pub new_expiration: String,
}

impl SessionCredential {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = try_read_to_string(path).ok_or_else(|| R6sError::InvalidCredentials {
            message: format!("no session file at {}", path.display()),
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| R6sError::InvalidCredentials {
            message: format!("unreadable session file: {e}"),
        })
    }

    /// JSON with four-space indentation and no trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(|e| R6sError::InvalidCredentials {
            message: format!("session is not valid UTF-8: {e}"),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_string(path, &self.to_json()?)?;
        Ok(())
    }

    /// The ticket still valid at `now`, preferring the refreshed one.
    pub fn active_ticket(&self, now: DateTime<Utc>) -> Option<&str> {
        let valid = |ticket: &str, expiration: &str| {
            !ticket.is_empty() && parse_expiration(expiration).is_some_and(|exp| exp > now)
        };
        if valid(&self.new_key, &self.new_expiration) {
            Some(&self.new_key)
        } else if valid(&self.key, &self.expiration) {
            Some(&self.key)
        } else {
            None
        }
    }
}

fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub struct UbisoftSource {
    client: Client,
    base_url: String,
    session_file: PathBuf,
    avatar_template: String,
    assets: Option<Arc<AssetCache>>,
}

impl UbisoftSource {
    pub fn new(client: Client, session_file: impl Into<PathBuf>) -> Self {
        Self {
            client,
            base_url: UBISOFT_BASE_URL.to_string(),
            session_file: session_file.into(),
            avatar_template: AVATAR_URL_TEMPLATE.to_string(),
            assets: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(url);
        self
    }

    /// Avatar CDN template; `{}` is replaced by the profile id.
    pub fn with_avatar_template(mut self, template: impl Into<String>) -> Self {
        self.avatar_template = template.into();
        self
    }

    /// Pull the profile picture through `assets` on every successful fetch.
    pub fn with_asset_cache(mut self, assets: Arc<AssetCache>) -> Self {
        self.assets = Some(assets);
        self
    }

    async fn cache_avatar(&self, profile_id: &str) {
        let Some(assets) = &self.assets else {
            return;
        };
        let url = avatar_url(&self.avatar_template, profile_id);
        if let Err(e) = assets
            .get_or_fetch(&self.client, AssetKind::Avatars, profile_id, Some(&url))
            .await
        {
            warn!("{UBISOFT}: could not cache avatar for {profile_id}: {e}");
        }
    }

    fn space_id<'a>(platform: Platform, session: &'a SessionCredential) -> &'a str {
        match platform {
            Platform::Pc if !session.spaceid.is_empty() => &session.spaceid,
            Platform::Pc => PC_SPACE_ID,
            Platform::Xbox => XBOX_SPACE_ID,
            Platform::Psn => PSN_SPACE_ID,
        }
    }

    async fn get_json(&self, url: &str, headers: &HeaderMap) -> Result<Value> {
        debug!("{UBISOFT}: GET {url}");
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| R6sError::from_transport(UBISOFT, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(UBISOFT, status, ""));
        }
        response
            .json()
            .await
            .map_err(|e| R6sError::from_transport(UBISOFT, e))
    }

    async fn resolve_profile(
        &self,
        identifier: &str,
        platform: Platform,
        headers: &HeaderMap,
    ) -> Result<Value> {
        let url = format!("{}/v3/profiles", self.base_url);
        let response = self
            .client
            .get(&url)
            .headers(headers.clone())
            .query(&[
                ("namesOnPlatform", identifier),
                ("platformType", platform.ubisoft_platform_type()),
            ])
            .send()
            .await
            .map_err(|e| R6sError::from_transport(UBISOFT, e))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => {
                return Err(R6sError::InvalidCredentials {
                    message: "session rejected by the account API".to_string(),
                })
            }
            status => return Err(status_error(UBISOFT, status, identifier)),
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| R6sError::from_transport(UBISOFT, e))?;
        match body.get_mut("profiles").and_then(Value::as_array_mut) {
            Some(profiles) if !profiles.is_empty() => Ok(profiles.swap_remove(0)),
            _ => Err(R6sError::NotFound {
                username: identifier.to_string(),
            }),
        }
    }
}

/// Keep a sub-request's body, or log its failure and keep `null`.
fn or_null(label: &str, result: Result<Value>) -> Value {
    result.unwrap_or_else(|e| {
        warn!("{UBISOFT}: {label} request failed: {e}");
        Value::Null
    })
}

#[async_trait]
impl SourceAdapter for UbisoftSource {
    fn name(&self) -> &'static str {
        UBISOFT
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    async fn fetch(&self, identifier: &str, platform: Option<Platform>) -> Result<RawPayload> {
        let platform = platform.unwrap_or_default();
        let session = SessionCredential::load(&self.session_file)?;
        let ticket = session
            .active_ticket(Utc::now())
            .ok_or_else(|| R6sError::InvalidCredentials {
                message: "session expired, log in again".to_string(),
            })?;
        let headers = ubi_header_map(ticket, &session.sessionid)?;

        let profile = self.resolve_profile(identifier, platform, &headers).await?;
        let profile_id = profile
            .get("profileId")
            .and_then(Value::as_str)
            .ok_or_else(|| R6sError::malformed(UBISOFT, "profile without profileId"))?
            .to_string();
        let user_id = profile
            .get("userId")
            .and_then(Value::as_str)
            .unwrap_or(&profile_id)
            .to_string();
        let space_id = Self::space_id(platform, &session);
        let base = &self.base_url;

        let linked_url = format!("{base}/v3/users/{user_id}/profiles");
        let ranked_url = format!(
            "{base}/v2/spaces/{space_id}/title/r6s/skill/full_profiles?profile_ids={profile_id}&platform_families={}",
            platform.platform_family()
        );
        let playtime_url = format!(
            "{base}/v1/profiles/stats?profileIds={profile_id}&spaceId={space_id}&statNames={PLAYTIME_STATS}"
        );
        let progression_url = format!(
            "{base}/v1/spaces/{space_id}/title/r6s/rewards/public_profile?profile_id={profile_id}"
        );
        let persona_url =
            format!("{base}/v1/profiles/persona?profileIds={profile_id}&spaceId={space_id}");

        let (linked, ranked, playtime, progression, persona, ()) = tokio::join!(
            self.get_json(&linked_url, &headers),
            self.get_json(&ranked_url, &headers),
            self.get_json(&playtime_url, &headers),
            self.get_json(&progression_url, &headers),
            self.get_json(&persona_url, &headers),
            self.cache_avatar(&profile_id),
        );

        let body = json!({
            "profile": profile,
            "linked_accounts": or_null("linked accounts", linked),
            "ranked": or_null("ranked profile", ranked),
            "playtime": or_null("playtime", playtime),
            "progression": or_null("progression", progression),
            "persona": or_null("persona", persona),
        });

        Ok(RawPayload::new(UBISOFT, identifier, platform, body))
    }
}
