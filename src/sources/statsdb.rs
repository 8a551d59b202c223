//! Stats database API behind HTTP Basic Auth.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::{
    join_segments, status_error, trim_base_url, Capabilities, RawPayload, SourceAdapter, R6DB,
};
use crate::cli::types::Platform;
use crate::config::{DbCredentials, DB_PASSWORD_ENV_VAR, DB_USERNAME_ENV_VAR};
use crate::error::{R6sError, Result};

pub const STATSDB_BASE_URL: &str = "https://api.statsdb.net";

pub struct StatsDbSource {
    client: Client,
    base_url: String,
    credentials: Option<DbCredentials>,
}

impl StatsDbSource {
    pub fn new(client: Client, credentials: Option<DbCredentials>) -> Self {
        if credentials.is_none() {
            warn!("{R6DB}: no credentials configured, requests will be rejected");
        }
        Self {
            client,
            base_url: STATSDB_BASE_URL.to_string(),
            credentials,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(url);
        self
    }

    fn player_url(&self, identifier: &str, platform: Platform) -> Result<Url> {
        join_segments(
            R6DB,
            &self.base_url,
            &["r6", platform.path_segment(), "player", identifier],
        )
    }
}

#[async_trait]
impl SourceAdapter for StatsDbSource {
    fn name(&self) -> &'static str {
        R6DB
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            operator_breakdown: true,
            recent_matches: false,
        }
    }

    async fn fetch(&self, identifier: &str, platform: Option<Platform>) -> Result<RawPayload> {
        let platform = platform.unwrap_or_default();
        let url = self.player_url(identifier, platform)?;
        debug!("{R6DB}: GET {url}");

        let mut request = self.client.get(url);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }
        let response = request
            .send()
            .await
            .map_err(|e| R6sError::from_transport(R6DB, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            if status == StatusCode::UNAUTHORIZED {
                warn!(
                    "{R6DB}: set {DB_USERNAME_ENV_VAR} and {DB_PASSWORD_ENV_VAR} to valid credentials"
                );
            }
            return Err(status_error(R6DB, status, identifier));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| R6sError::from_transport(R6DB, e))?;

        Ok(RawPayload::new(R6DB, identifier, platform, body))
    }
}
