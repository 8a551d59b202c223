use serde::Deserialize;

use super::{de, decode};
use crate::cli::types::ProfileId;
use crate::error::{R6sError, Result};
use crate::sources::tracker::{MAIN_BLOCK_KEY, SEASONS_BLOCK_KEY};
use crate::sources::{RawPayload, R6TRACKER};
use crate::stats::{
    BasicProfile, GameMode, GeneralStat, ModeStat, PlayerIdentity, PlayerStatisticsBuilder,
    RegionSnapshot, SeasonRank,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MainBlock {
    nickname: Option<String>,
    profile_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    level: Option<u64>,
    region: Option<String>,
    #[serde(default)]
    stats: Counters,
    ranked: Option<Counters>,
    casual: Option<Counters>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Counters {
    #[serde(default, deserialize_with = "de::opt_u64")]
    kills: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    deaths: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    assists: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    headshots: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    melee_kills: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    revives: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    wins: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    losses: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    matches: Option<u64>,
    /// Seconds, usually as a string.
    #[serde(default, deserialize_with = "de::opt_u64")]
    time_played: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    mmr: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeasonRow {
    #[serde(default, deserialize_with = "de::opt_u32")]
    season: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    mmr: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    max_mmr: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    wins: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    losses: Option<u64>,
}

impl Counters {
    fn into_mode_stat(self, mode: GameMode) -> ModeStat {
        ModeStat {
            mode,
            kills: self.kills,
            deaths: self.deaths,
            time_played: self.time_played,
            played: self.matches,
            won: self.wins,
            lost: self.losses,
            mmr: self.mmr,
            tier: None,
            updated_at: None,
        }
    }
}

pub fn map(raw: &RawPayload) -> Result<PlayerStatisticsBuilder> {
    let main_value = raw
        .body
        .get(MAIN_BLOCK_KEY)
        .ok_or_else(|| R6sError::malformed(R6TRACKER, "missing main data block"))?;
    let main: MainBlock = decode(R6TRACKER, main_value)?;
    let seasons: Vec<SeasonRow> = match raw.body.get(SEASONS_BLOCK_KEY) {
        Some(value) if !value.is_null() => decode(R6TRACKER, value)?,
        _ => Vec::new(),
    };

    let username = main.nickname.unwrap_or_else(|| raw.identifier.clone());
    let profile_id = main.profile_id.map(ProfileId::new);
    let mut builder =
        PlayerStatisticsBuilder::new(PlayerIdentity::new(username, profile_id, raw.platform));

    if let Some(level) = main.level {
        builder.profile = Some(BasicProfile::from_regions(vec![RegionSnapshot {
            region: main.region.unwrap_or_else(|| "global".to_string()),
            level: u32::try_from(level).unwrap_or(u32::MAX),
            platform: Some(raw.platform.to_string()),
        }]));
    }

    let stats = main.stats;
    builder.general = Some(GeneralStat {
        kills: stats.kills,
        deaths: stats.deaths,
        assists: stats.assists,
        melee_kills: stats.melee_kills,
        headshots: stats.headshots,
        revives: stats.revives,
        time_played: stats.time_played,
        played: stats.matches,
        won: stats.wins,
        lost: stats.losses,
        ..GeneralStat::default()
    });
    builder.ranked = main.ranked.map(|c| c.into_mode_stat(GameMode::Ranked));
    builder.casual = main.casual.map(|c| c.into_mode_stat(GameMode::Casual));

    builder.raw_seasons = seasons
        .into_iter()
        .filter_map(|row| {
            Some(SeasonRank {
                mmr: row.mmr,
                max_mmr: row.max_mmr,
                wins: row.wins,
                losses: row.losses,
                ..SeasonRank::new(row.season?)
            })
        })
        .collect();

    Ok(builder)
}
