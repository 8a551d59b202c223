//! Player lookup: select a source, fetch with retry, normalize, render.

use std::fmt;
use std::sync::Arc;

use log::{error, info};
use reqwest::Client;
use serde::Serialize;

use super::{common::print_json, common::CommandContext, resolve_username};
use crate::{
    cli::types::{ChatUserId, Platform, StatKind},
    config::Settings,
    core::AssetCache,
    normalize::Normalizer,
    retry::{with_retry, RetryPolicy},
    select::SourceRegistry,
    stats::{compute::hours, ModeStat, PlayerStatistics},
    Result,
};

/// Operators listed by the text renderer.
const TOP_OPERATORS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub username: String,
    pub platform: Option<Platform>,
    pub kind: StatKind,
    /// Source name overriding the configured default.
    pub source: Option<String>,
}

impl LookupRequest {
    pub fn new(username: impl Into<String>, kind: StatKind) -> Self {
        Self {
            username: username.into(),
            platform: None,
            kind,
            source: None,
        }
    }
}

/// What a renderer receives.
#[derive(Debug, Clone, Serialize)]
pub struct Lookup {
    pub title: String,
    pub statistics: PlayerStatistics,
    pub source: &'static str,
    pub kind: StatKind,
}

/// Selection, retry and normalization wired together.
pub struct StatsService {
    registry: SourceRegistry,
    normalizer: Normalizer,
    retry: RetryPolicy,
    default_source: String,
}

impl StatsService {
    pub fn new(
        registry: SourceRegistry,
        normalizer: Normalizer,
        retry: RetryPolicy,
        default_source: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            normalizer,
            retry,
            default_source: default_source.into(),
        }
    }

    pub fn from_settings(
        settings: &Settings,
        client: &Client,
        assets: Option<Arc<AssetCache>>,
    ) -> Self {
        Self::new(
            SourceRegistry::from_settings(settings, client, assets),
            Normalizer::from_settings(settings),
            settings.retry_policy(),
            settings.adapter.clone(),
        )
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub async fn lookup(&self, request: &LookupRequest) -> Result<Lookup> {
        let adapter = self.registry.select_for(
            request.kind,
            &self.default_source,
            request.source.as_deref(),
        )?;
        let source = adapter.name();
        info!(
            "looking up {} ({}) on {source}",
            request.username, request.kind
        );

        let raw = with_retry(source, &self.retry, || {
            adapter.fetch(&request.username, request.platform)
        })
        .await?;
        let statistics = self.normalizer.normalize(source, &raw)?;

        Ok(Lookup {
            title: format!("{} | {}", statistics.identity().username(), request.kind.title()),
            statistics,
            source,
            kind: request.kind,
        })
    }
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "Unknown".to_string(), |v| v.to_string())
}

fn write_mode(f: &mut fmt::Formatter<'_>, label: &str, mode: Option<&ModeStat>) -> fmt::Result {
    let Some(mode) = mode else {
        return writeln!(f, "{label}: no data");
    };
    writeln!(
        f,
        "{label}: K/D {} | Win rate {} | Matches {} | MMR {} | Rank {}",
        mode.kd(),
        mode.win_rate(),
        or_unknown(mode.played),
        or_unknown(mode.mmr.map(|m| m.round())),
        or_unknown(mode.tier),
    )
}

/// Plain-text view of a lookup, one section per stat kind.
pub struct TextReport<'a>(pub &'a Lookup);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lookup = self.0;
        let stats = &lookup.statistics;
        writeln!(
            f,
            "{} [{}] via {}",
            lookup.title,
            stats.identity().platform(),
            lookup.source
        )?;

        match lookup.kind {
            StatKind::Basic => {
                writeln!(f, "Level: {}", or_unknown(stats.level()))?;
                let Some(general) = stats.general() else {
                    return writeln!(f, "No overall statistics");
                };
                writeln!(f, "K/D: {}", general.kd())?;
                writeln!(f, "Win rate: {}", general.win_rate())?;
                writeln!(f, "Headshots/kill: {}", general.headshot_ratio())?;
                writeln!(f, "Accuracy: {}", general.accuracy())?;
                writeln!(f, "Matches: {}", or_unknown(general.played))?;
                writeln!(
                    f,
                    "Time played: {}",
                    or_unknown(general.time_played.map(|s| format!("{:.1}h", hours(s))))
                )?;
            }
            StatKind::Detail => {
                write_mode(f, "Casual", stats.casual())?;
                write_mode(f, "Ranked", stats.ranked())?;
                for season in stats.seasons() {
                    writeln!(
                        f,
                        "  {}: {} (peak {}) {}",
                        season.label(),
                        or_unknown(season.tier),
                        or_unknown(season.peak_tier),
                        season.win_rate()
                    )?;
                }
                if let Some(peak) = stats.historical_peak() {
                    writeln!(
                        f,
                        "Best season: {} at {} MMR ({})",
                        peak.label(),
                        or_unknown(peak.max_mmr.map(|m| m.round())),
                        or_unknown(peak.peak_tier)
                    )?;
                }
            }
            StatKind::Operators => {
                let top = stats.top_operators(TOP_OPERATORS);
                if top.is_empty() {
                    writeln!(f, "No operator statistics")?;
                }
                for (i, op) in top.iter().enumerate() {
                    writeln!(
                        f,
                        "{}. {}: {} rounds | K/D {} | Win rate {} | {:.1}h",
                        i + 1,
                        op.name,
                        op.played(),
                        op.kd(),
                        op.win_rate(),
                        hours(op.time_played)
                    )?;
                }
            }
            StatKind::RecentPlays => {
                if stats.recent().is_empty() {
                    writeln!(f, "No recent matches")?;
                }
                for mode in stats.recent() {
                    let when = mode
                        .updated_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string());
                    let label = format!("{:?} {}", mode.mode, or_unknown(when));
                    write_mode(f, &label, Some(mode))?;
                }
            }
        }
        Ok(())
    }
}

pub fn render_text(lookup: &Lookup) -> String {
    TextReport(lookup).to_string()
}

pub struct LookupParams {
    pub name: Option<String>,
    pub platform: Option<Platform>,
    pub kind: StatKind,
    pub source: Option<String>,
    pub user: Option<ChatUserId>,
    pub as_json: bool,
}

/// Handle the lookup command
pub async fn handle_lookup(ctx: &CommandContext, params: LookupParams) -> Result<()> {
    let store = match params.user {
        Some(_) => Some(ctx.binding_store()?),
        None => None,
    };
    let username = resolve_username(
        params.name.as_deref(),
        params.user.as_ref(),
        store.as_deref(),
        &ctx.settings.default_name,
    )?;

    let service = StatsService::from_settings(&ctx.settings, &ctx.client, Some(ctx.assets.clone()));
    let request = LookupRequest {
        username,
        platform: params.platform,
        kind: params.kind,
        source: params.source,
    };

    let lookup = match service.lookup(&request).await {
        Ok(lookup) => lookup,
        Err(err) => {
            error!("lookup for {} failed: {err}", request.username);
            return Err(err);
        }
    };

    if params.as_json {
        print_json(&lookup)?;
    } else {
        print!("{}", render_text(&lookup));
    }
    Ok(())
}
