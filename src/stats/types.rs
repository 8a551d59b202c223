//! Canonical player statistics model every source normalizes into.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::compute::{dedup_seasons, historical_peak, percentage, ratio, Percentage, Ratio};
use crate::cli::types::{Platform, ProfileId};
use crate::rank::{classify, BreakpointTable, TierLabel};

/// Who the statistics belong to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerIdentity {
    username: String,
    profile_id: Option<ProfileId>,
    platform: Platform,
}

impl PlayerIdentity {
    pub fn new(username: impl Into<String>, profile_id: Option<ProfileId>, platform: Platform) -> Self {
        Self {
            username: username.into(),
            profile_id,
            platform,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn profile_id(&self) -> Option<&ProfileId> {
        self.profile_id.as_ref()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

/// Level snapshot for one server region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSnapshot {
    pub region: String,
    pub level: u32,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasicProfile {
    pub level: u32,
    pub regions: Vec<RegionSnapshot>,
}

impl BasicProfile {
    /// Profile whose level is the highest across `regions`.
    pub fn from_regions(regions: Vec<RegionSnapshot>) -> Self {
        let level = regions.iter().map(|r| r.level).max().unwrap_or(0);
        Self { level, regions }
    }
}

/// Lifetime totals. Time is in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneralStat {
    pub kills: Option<u64>,
    pub deaths: Option<u64>,
    pub assists: Option<u64>,
    pub melee_kills: Option<u64>,
    pub penetration_kills: Option<u64>,
    pub headshots: Option<u64>,
    pub revives: Option<u64>,
    pub bullets_fired: Option<u64>,
    pub bullets_hit: Option<u64>,
    pub time_played: Option<u64>,
    pub played: Option<u64>,
    pub won: Option<u64>,
    pub lost: Option<u64>,
}

impl GeneralStat {
    pub fn kd(&self) -> Ratio {
        ratio(self.kills, self.deaths)
    }

    pub fn win_rate(&self) -> Percentage {
        percentage(self.won, self.played)
    }

    /// Headshots per kill.
    pub fn headshot_ratio(&self) -> Ratio {
        ratio(self.headshots, self.kills)
    }

    pub fn accuracy(&self) -> Percentage {
        percentage(self.bullets_hit, self.bullets_fired)
    }

    /// `Some(false)` when the source reports `played != won + lost`.
    /// Sources are not corrected, only checked.
    pub fn played_is_consistent(&self) -> Option<bool> {
        match (self.played, self.won, self.lost) {
            (Some(played), Some(won), Some(lost)) => Some(won.checked_add(lost) == Some(played)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Casual,
    Ranked,
}

/// Per game-mode numbers, also used for recent match records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeStat {
    pub mode: GameMode,
    pub kills: Option<u64>,
    pub deaths: Option<u64>,
    pub time_played: Option<u64>,
    pub played: Option<u64>,
    pub won: Option<u64>,
    pub lost: Option<u64>,
    pub mmr: Option<f64>,
    pub tier: Option<TierLabel>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ModeStat {
    pub fn empty(mode: GameMode) -> Self {
        Self {
            mode,
            kills: None,
            deaths: None,
            time_played: None,
            played: None,
            won: None,
            lost: None,
            mmr: None,
            tier: None,
            updated_at: None,
        }
    }

    pub fn kd(&self) -> Ratio {
        ratio(self.kills, self.deaths)
    }

    pub fn win_rate(&self) -> Percentage {
        percentage(self.won, self.played)
    }
}

/// Result of one competitive season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRank {
    pub season: u32,
    pub mmr: Option<f64>,
    pub max_mmr: Option<f64>,
    pub wins: Option<u64>,
    pub losses: Option<u64>,
    pub tier: Option<TierLabel>,
    pub peak_tier: Option<TierLabel>,
}

impl SeasonRank {
    pub fn new(season: u32) -> Self {
        Self {
            season,
            mmr: None,
            max_mmr: None,
            wins: None,
            losses: None,
            tier: None,
            peak_tier: None,
        }
    }

    /// Season ordinal as `Y{year}S{season}`, four seasons a year.
    ///
    /// ```rust
    /// use r6s_stats::stats::SeasonRank;
    ///
    /// assert_eq!(SeasonRank::new(1).label(), "Y1S1");
    /// assert_eq!(SeasonRank::new(24).label(), "Y6S4");
    /// ```
    pub fn label(&self) -> String {
        const SEASONS_PER_YEAR: u32 = 4;
        let shifted = self.season.max(1).saturating_add(SEASONS_PER_YEAR - 1);
        let year = shifted / SEASONS_PER_YEAR;
        let quarter = shifted % SEASONS_PER_YEAR + 1;
        format!("Y{year}S{quarter}")
    }

    pub fn win_rate(&self) -> Percentage {
        let played = match (self.wins, self.losses) {
            (Some(w), Some(l)) => Some(w.saturating_add(l)),
            _ => None,
        };
        percentage(self.wins, played)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorStat {
    pub name: String,
    pub kills: u64,
    pub deaths: u64,
    pub time_played: u64,
    pub won: u64,
    pub lost: u64,
}

impl OperatorStat {
    pub fn played(&self) -> u64 {
        self.won.saturating_add(self.lost)
    }

    pub fn kd(&self) -> Ratio {
        ratio(Some(self.kills), Some(self.deaths))
    }

    pub fn win_rate(&self) -> Percentage {
        percentage(Some(self.won), Some(self.played()))
    }
}

/// Normalized statistics for one lookup. Built once through
/// [`PlayerStatisticsBuilder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatistics {
    identity: PlayerIdentity,
    profile: Option<BasicProfile>,
    general: Option<GeneralStat>,
    casual: Option<ModeStat>,
    ranked: Option<ModeStat>,
    seasons: Vec<SeasonRank>,
    historical_peak: Option<SeasonRank>,
    operators: Vec<OperatorStat>,
    recent: Vec<ModeStat>,
}

impl PlayerStatistics {
    pub fn builder(identity: PlayerIdentity) -> PlayerStatisticsBuilder {
        PlayerStatisticsBuilder::new(identity)
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    pub fn profile(&self) -> Option<&BasicProfile> {
        self.profile.as_ref()
    }

    pub fn level(&self) -> Option<u32> {
        self.profile.as_ref().map(|p| p.level)
    }

    pub fn general(&self) -> Option<&GeneralStat> {
        self.general.as_ref()
    }

    pub fn casual(&self) -> Option<&ModeStat> {
        self.casual.as_ref()
    }

    pub fn ranked(&self) -> Option<&ModeStat> {
        self.ranked.as_ref()
    }

    pub fn seasons(&self) -> &[SeasonRank] {
        &self.seasons
    }

    pub fn historical_peak(&self) -> Option<&SeasonRank> {
        self.historical_peak.as_ref()
    }

    pub fn operators(&self) -> &[OperatorStat] {
        &self.operators
    }

    /// The `n` most played operators, most played first.
    pub fn top_operators(&self, n: usize) -> Vec<&OperatorStat> {
        let mut ops: Vec<&OperatorStat> = self.operators.iter().collect();
        ops.sort_by(|a, b| b.played().cmp(&a.played()));
        ops.truncate(n);
        ops
    }

    pub fn recent(&self) -> &[ModeStat] {
        &self.recent
    }
}

/// Mutable staging area a source mapping fills in before the model is
/// sealed. Seasons are pushed raw; [`build`](Self::build) deduplicates them
/// and picks the historical peak from the undeduplicated feed.
#[derive(Debug, Clone)]
pub struct PlayerStatisticsBuilder {
    pub identity: PlayerIdentity,
    pub profile: Option<BasicProfile>,
    pub general: Option<GeneralStat>,
    pub casual: Option<ModeStat>,
    pub ranked: Option<ModeStat>,
    pub raw_seasons: Vec<SeasonRank>,
    pub operators: Vec<OperatorStat>,
    pub recent: Vec<ModeStat>,
}

impl PlayerStatisticsBuilder {
    pub fn new(identity: PlayerIdentity) -> Self {
        Self {
            identity,
            profile: None,
            general: None,
            casual: None,
            ranked: None,
            raw_seasons: Vec::new(),
            operators: Vec::new(),
            recent: Vec::new(),
        }
    }

    /// Attach tier labels to every MMR value using `table`.
    pub fn annotate_tiers(&mut self, table: &'static BreakpointTable) {
        let modes = self
            .casual
            .iter_mut()
            .chain(self.ranked.iter_mut())
            .chain(self.recent.iter_mut());
        for mode in modes {
            mode.tier = mode.mmr.map(|mmr| classify(mmr, table));
        }
        for season in &mut self.raw_seasons {
            season.tier = season.mmr.map(|mmr| classify(mmr, table));
            season.peak_tier = season.max_mmr.map(|mmr| classify(mmr, table));
        }
    }

    pub fn build(self) -> PlayerStatistics {
        let seasons = dedup_seasons(&self.raw_seasons);
        let historical_peak = historical_peak(&self.raw_seasons);
        PlayerStatistics {
            identity: self.identity,
            profile: self.profile,
            general: self.general,
            casual: self.casual,
            ranked: self.ranked,
            seasons,
            historical_peak,
            operators: self.operators,
            recent: self.recent,
        }
    }
}
