//! Upstream adapters. Each one talks to exactly one endpoint and hands back
//! the payload untouched; shaping it is the normalizer's job.

pub mod r6scn;
pub mod statsdb;
pub mod tracker;
pub mod ubisoft;

use async_trait::async_trait;
use log::warn;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

use crate::cli::types::{Platform, StatKind};
use crate::error::{R6sError, Result};

pub use r6scn::R6scnSource;
pub use statsdb::StatsDbSource;
pub use tracker::TrackerSource;
pub use ubisoft::{SessionCredential, UbisoftSource};

pub const R6SCN: &str = "r6scn";
pub const R6TRACKER: &str = "r6tracker";
pub const R6DB: &str = "r6db";
pub const UBISOFT: &str = "ubisoft";

/// What a source can deliver beyond the basic and detail views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub operator_breakdown: bool,
    pub recent_matches: bool,
}

impl Capabilities {
    pub fn supports(&self, kind: StatKind) -> bool {
        match kind {
            StatKind::Basic | StatKind::Detail => true,
            StatKind::Operators => self.operator_breakdown,
            StatKind::RecentPlays => self.recent_matches,
        }
    }
}

/// Undecoded-by-schema payload returned by one adapter call.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload {
    pub source: &'static str,
    /// Name the caller asked for.
    pub identifier: String,
    pub platform: Platform,
    pub body: Value,
}

impl RawPayload {
    pub fn new(source: &'static str, identifier: &str, platform: Platform, body: Value) -> Self {
        Self {
            source,
            identifier: identifier.to_string(),
            platform,
            body,
        }
    }
}

#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> Capabilities;

    /// Fetch raw statistics for `identifier`. `None` means the source's
    /// default platform (PC).
    async fn fetch(&self, identifier: &str, platform: Option<Platform>) -> Result<RawPayload>;
}

/// Shared status-code policy: 404 is a missing player, 401 a credential
/// problem, 429 and 5xx are worth retrying, anything else is terminal.
pub(crate) fn status_error(source_name: &str, status: StatusCode, username: &str) -> R6sError {
    match status {
        StatusCode::NOT_FOUND => R6sError::NotFound {
            username: username.to_string(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            warn!("{source_name} rejected the configured credentials (HTTP {status})");
            R6sError::Unauthorized {
                source_name: source_name.to_string(),
            }
        }
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("{source_name} request limit reached");
            R6sError::RateLimited {
                source_name: source_name.to_string(),
            }
        }
        s => R6sError::Upstream {
            source_name: source_name.to_string(),
            status: s.as_u16(),
            retryable: s.is_server_error(),
        },
    }
}

pub(crate) fn trim_base_url(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}

/// `base` with `segments` appended, each percent-encoded as one path segment.
pub(crate) fn join_segments(source_name: &str, base: &str, segments: &[&str]) -> Result<Url> {
    let bad_base = || R6sError::Config {
        message: format!("{source_name}: unusable base URL {base}"),
    };
    let mut url = Url::parse(base).map_err(|_| bad_base())?;
    url.path_segments_mut()
        .map_err(|()| bad_base())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
