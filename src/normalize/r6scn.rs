use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{de, decode};
use crate::cli::types::ProfileId;
use crate::error::{R6sError, Result};
use crate::sources::{RawPayload, R6SCN};
use crate::stats::{
    BasicProfile, GameMode, GeneralStat, ModeStat, OperatorStat, PlayerIdentity,
    PlayerStatisticsBuilder, RegionSnapshot, SeasonRank,
};

#[derive(Debug, Deserialize)]
struct Payload {
    username: Option<String>,
    #[serde(rename = "Basicstat", default)]
    regions: Vec<RegionRow>,
    #[serde(rename = "StatGeneral", default)]
    general: Vec<GeneralRow>,
    #[serde(rename = "StatCR", default)]
    modes: Vec<ModeRow>,
    #[serde(rename = "StatCR2", default)]
    recent: Vec<ModeRow>,
    #[serde(rename = "StatOperator", default)]
    operators: Vec<OperatorRow>,
    #[serde(rename = "SeasonRanks", default)]
    seasons: Vec<SeasonRow>,
    #[serde(rename = "Casualstat")]
    casual: Option<CasualRow>,
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    #[serde(default)]
    region: String,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    level: u64,
    platform: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneralRow {
    #[serde(default, deserialize_with = "de::opt_u64")]
    kills: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    deaths: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    kill_assists: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    melee_kills: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    penetration_kills: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    headshot: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    revives: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    bullets_fired: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    bullets_hit: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    time_played: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    played: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    won: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    lost: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModeRow {
    #[serde(default)]
    model: String,
    #[serde(default, deserialize_with = "de::opt_u64")]
    kills: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    deaths: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    time_played: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    played: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    won: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    lost: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    mmr: Option<f64>,
    #[serde(rename = "update_at")]
    update_at: Option<UpdateAt>,
}

#[derive(Debug, Deserialize)]
struct UpdateAt {
    #[serde(default, deserialize_with = "de::opt_timestamp_ms")]
    time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperatorRow {
    name: String,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    kills: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    deaths: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    time_played: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    won: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    lost: u64,
}

#[derive(Debug, Deserialize)]
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

#[derive(Debug, Deserialize)]
struct CasualRow {
    user_id: Option<String>,
}

fn mode_of(model: &str) -> Option<GameMode> {
    match model.to_ascii_lowercase().as_str() {
        "casual" => Some(GameMode::Casual),
        "ranked" => Some(GameMode::Ranked),
        _ => None,
    }
}

impl ModeRow {
    fn into_mode_stat(self) -> Option<ModeStat> {
        let mode = mode_of(&self.model)?;
        Some(ModeStat {
            mode,
            kills: self.kills,
            deaths: self.deaths,
            time_played: self.time_played,
            played: self.played,
            won: self.won,
            lost: self.lost,
            mmr: self.mmr,
            tier: None,
            updated_at: self.update_at.and_then(|u| u.time),
        })
    }
}

pub fn map(raw: &RawPayload) -> Result<PlayerStatisticsBuilder> {
    let payload: Payload = decode(R6SCN, &raw.body)?;

    let general = payload
        .general
        .into_iter()
        .next()
        .ok_or_else(|| R6sError::malformed(R6SCN, "StatGeneral is empty"))?;

    let username = payload.username.unwrap_or_else(|| raw.identifier.clone());
    let profile_id = payload
        .casual
        .and_then(|c| c.user_id)
        .filter(|id| !id.is_empty())
        .map(ProfileId::new);
    let mut builder =
        PlayerStatisticsBuilder::new(PlayerIdentity::new(username, profile_id, raw.platform));

    let regions = payload
        .regions
        .into_iter()
        .map(|r| RegionSnapshot {
            region: r.region,
            level: u32::try_from(r.level).unwrap_or(u32::MAX),
            platform: r.platform,
        })
        .collect();
    builder.profile = Some(BasicProfile::from_regions(regions));

    builder.general = Some(GeneralStat {
        kills: general.kills,
        deaths: general.deaths,
        assists: general.kill_assists,
        melee_kills: general.melee_kills,
        penetration_kills: general.penetration_kills,
        headshots: general.headshot,
        revives: general.revives,
        bullets_fired: general.bullets_fired,
        bullets_hit: general.bullets_hit,
        time_played: general.time_played,
        played: general.played,
        won: general.won,
        lost: general.lost,
    });

    for stat in payload.modes.into_iter().filter_map(ModeRow::into_mode_stat) {
        match stat.mode {
            GameMode::Casual => builder.casual = Some(stat),
            GameMode::Ranked => builder.ranked = Some(stat),
        }
    }
    builder.recent = payload
        .recent
        .into_iter()
        .filter_map(ModeRow::into_mode_stat)
        .collect();

    builder.operators = payload
        .operators
        .into_iter()
        .map(|op| OperatorStat {
            name: op.name,
            kills: op.kills,
            deaths: op.deaths,
            time_played: op.time_played,
            won: op.won,
            lost: op.lost,
        })
        .collect();

    builder.raw_seasons = payload
        .seasons
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
