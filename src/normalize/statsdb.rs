use serde::Deserialize;

use super::{de, decode};
use crate::cli::types::ProfileId;
use crate::error::{R6sError, Result};
use crate::sources::{RawPayload, R6DB};
use crate::stats::{
    BasicProfile, GameMode, GeneralStat, ModeStat, OperatorStat, PlayerIdentity,
    PlayerStatisticsBuilder, RegionSnapshot, SeasonRank,
};

#[derive(Debug, Deserialize)]
struct Envelope {
    payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    user: Option<User>,
    #[serde(default)]
    stats: Stats,
}

#[derive(Debug, Deserialize)]
struct User {
    nickname: String,
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Stats {
    progression: Option<Progression>,
    general: Option<Counters>,
    seasonal: Option<Seasonal>,
    #[serde(default)]
    operators: Vec<OperatorRow>,
    #[serde(default)]
    seasons: Vec<SeasonRow>,
}

#[derive(Debug, Deserialize)]
struct Progression {
    /// Sent as a string.
    #[serde(default, deserialize_with = "de::opt_u64")]
    level: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Seasonal {
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
    penetration_kills: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    revives: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    bullets_fired: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    bullets_hit: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    wins: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    losses: Option<u64>,
    #[serde(default, alias = "matches", deserialize_with = "de::opt_u64")]
    played: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    time_played: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    mmr: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperatorRow {
    id: String,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    kills: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    deaths: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    wins: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    losses: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    time_played: u64,
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
            played: self.played,
            won: self.wins,
            lost: self.losses,
            mmr: self.mmr,
            tier: None,
            updated_at: None,
        }
    }
}

pub fn map(raw: &RawPayload) -> Result<PlayerStatisticsBuilder> {
    let envelope: Envelope = decode(R6DB, &raw.body)?;
    let payload = envelope
        .payload
        .ok_or_else(|| R6sError::malformed(R6DB, "missing payload"))?;
    let user = payload
        .user
        .ok_or_else(|| R6sError::malformed(R6DB, "payload without user"))?;

    let mut builder = PlayerStatisticsBuilder::new(PlayerIdentity::new(
        user.nickname,
        user.id.map(ProfileId::new),
        raw.platform,
    ));
    let stats = payload.stats;

    if let Some(level) = stats.progression.and_then(|p| p.level) {
        builder.profile = Some(BasicProfile::from_regions(vec![RegionSnapshot {
            region: "global".to_string(),
            level: u32::try_from(level).unwrap_or(u32::MAX),
            platform: Some(raw.platform.to_string()),
        }]));
    }

    builder.general = stats.general.map(|g| GeneralStat {
        kills: g.kills,
        deaths: g.deaths,
        assists: g.assists,
        melee_kills: g.melee_kills,
        penetration_kills: g.penetration_kills,
        headshots: g.headshots,
        revives: g.revives,
        bullets_fired: g.bullets_fired,
        bullets_hit: g.bullets_hit,
        time_played: g.time_played,
        played: g.played,
        won: g.wins,
        lost: g.losses,
    });

    if let Some(seasonal) = stats.seasonal {
        builder.ranked = seasonal.ranked.map(|c| c.into_mode_stat(GameMode::Ranked));
        builder.casual = seasonal.casual.map(|c| c.into_mode_stat(GameMode::Casual));
    }

    builder.operators = stats
        .operators
        .into_iter()
        .map(|op| OperatorStat {
            name: op.id,
            kills: op.kills,
            deaths: op.deaths,
            time_played: op.time_played,
            won: op.wins,
            lost: op.losses,
        })
        .collect();

    builder.raw_seasons = stats
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
