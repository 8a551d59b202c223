use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::{de, decode};
use crate::cli::types::ProfileId;
use crate::error::{R6sError, Result};
use crate::sources::{RawPayload, UBISOFT};
use crate::stats::{
    BasicProfile, GameMode, GeneralStat, ModeStat, PlayerIdentity, PlayerStatisticsBuilder,
    RegionSnapshot, SeasonRank,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    profile_id: String,
    name_on_platform: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RankedResponse {
    #[serde(default)]
    platform_families_full_profiles: Vec<PlatformFamily>,
}

#[derive(Debug, Deserialize)]
struct PlatformFamily {
    #[serde(default)]
    board_ids_full_profiles: Vec<Board>,
}

#[derive(Debug, Deserialize)]
struct Board {
    board_id: String,
    #[serde(default)]
    full_profiles: Vec<FullProfile>,
}

#[derive(Debug, Deserialize)]
struct FullProfile {
    profile: BoardProfile,
    season_statistics: Option<SeasonStatistics>,
}

#[derive(Debug, Deserialize)]
struct BoardProfile {
    #[serde(default, deserialize_with = "de::opt_f64")]
    rank_points: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    max_rank_points: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    season_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SeasonStatistics {
    #[serde(default, deserialize_with = "de::opt_u64")]
    kills: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64")]
    deaths: Option<u64>,
    match_outcomes: Option<MatchOutcomes>,
}

#[derive(Debug, Deserialize)]
struct MatchOutcomes {
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    wins: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    losses: u64,
    #[serde(default, deserialize_with = "de::u64_or_zero")]
    abandons: u64,
}

#[derive(Debug, Default, Deserialize)]
struct PlaytimeResponse {
    #[serde(default)]
    profiles: Vec<PlaytimeProfile>,
}

#[derive(Debug, Deserialize)]
struct PlaytimeProfile {
    #[serde(default)]
    stats: BTreeMap<String, PlaytimeStat>,
}

#[derive(Debug, Deserialize)]
struct PlaytimeStat {
    /// Seconds (or a level), as a string.
    #[serde(default, deserialize_with = "de::opt_u64")]
    value: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Progression {
    #[serde(default, deserialize_with = "de::opt_u64")]
    level: Option<u64>,
}

/// Sub-responses that failed upstream are `null`; treat them as empty.
fn optional<T>(body: &Value, key: &str) -> Result<Option<T>>
where
    T: for<'de> Deserialize<'de>,
{
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode(UBISOFT, value).map(Some),
    }
}

impl FullProfile {
    fn into_mode_stat(self, mode: GameMode) -> ModeStat {
        let mut stat = ModeStat::empty(mode);
        stat.mmr = self.profile.rank_points;
        if let Some(season) = self.season_statistics {
            stat.kills = season.kills;
            stat.deaths = season.deaths;
            if let Some(outcomes) = season.match_outcomes {
                stat.won = Some(outcomes.wins);
                stat.lost = Some(outcomes.losses);
                stat.played = Some(
                    outcomes
                        .wins
                        .saturating_add(outcomes.losses)
                        .saturating_add(outcomes.abandons),
                );
            }
        }
        stat
    }

    fn season_rank(&self) -> Option<SeasonRank> {
        let outcomes = self
            .season_statistics
            .as_ref()
            .and_then(|s| s.match_outcomes.as_ref());
        Some(SeasonRank {
            mmr: self.profile.rank_points,
            max_mmr: self.profile.max_rank_points,
            wins: outcomes.map(|o| o.wins),
            losses: outcomes.map(|o| o.losses),
            ..SeasonRank::new(self.profile.season_id?)
        })
    }
}

pub fn map(raw: &RawPayload) -> Result<PlayerStatisticsBuilder> {
    let profile: Profile = match raw.body.get("profile") {
        Some(value) if !value.is_null() => decode(UBISOFT, value)?,
        _ => return Err(R6sError::malformed(UBISOFT, "payload without a profile")),
    };
    let ranked: RankedResponse = optional(&raw.body, "ranked")?.unwrap_or_default();
    let playtime: PlaytimeResponse = optional(&raw.body, "playtime")?.unwrap_or_default();
    let progression: Option<Progression> = optional(&raw.body, "progression")?;

    let username = profile
        .name_on_platform
        .unwrap_or_else(|| raw.identifier.clone());
    let mut builder = PlayerStatisticsBuilder::new(PlayerIdentity::new(
        username,
        Some(ProfileId::new(profile.profile_id)),
        raw.platform,
    ));

    let playtime_stats = playtime.profiles.into_iter().next().map(|p| p.stats);
    let stat_value = |name: &str| {
        playtime_stats
            .as_ref()
            .and_then(|stats| stats.get(name))
            .and_then(|s| s.value)
    };

    let level = progression
        .and_then(|p| p.level)
        .or_else(|| stat_value("PClearanceLevel"));
    if let Some(level) = level {
        builder.profile = Some(BasicProfile::from_regions(vec![RegionSnapshot {
            region: "global".to_string(),
            level: u32::try_from(level).unwrap_or(u32::MAX),
            platform: Some(raw.platform.ubisoft_platform_type().to_string()),
        }]));
    }

    if let Some(seconds) = stat_value("PPvPTimePlayed") {
        builder.general = Some(GeneralStat {
            time_played: Some(seconds),
            ..GeneralStat::default()
        });
    }

    let boards = ranked
        .platform_families_full_profiles
        .into_iter()
        .flat_map(|family| family.board_ids_full_profiles);
    for board in boards {
        let mode = match board.board_id.as_str() {
            "ranked" => GameMode::Ranked,
            "casual" | "standard" => GameMode::Casual,
            _ => continue,
        };
        let Some(full) = board.full_profiles.into_iter().next() else {
            continue;
        };
        if mode == GameMode::Ranked {
            builder.raw_seasons.extend(full.season_rank());
        }
        let stat = full.into_mode_stat(mode);
        match mode {
            GameMode::Ranked => builder.ranked = Some(stat),
            GameMode::Casual => builder.casual = builder.casual.take().or(Some(stat)),
        }
    }

    Ok(builder)
}
