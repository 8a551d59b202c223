//! Canonical statistics model and the metrics derived from it.

pub mod compute;
pub mod types;

pub use compute::{Percentage, Ratio, INFINITE_SENTINEL, UNKNOWN_SENTINEL};
pub use types::{
    BasicProfile, GameMode, GeneralStat, ModeStat, OperatorStat, PlayerIdentity,
    PlayerStatistics, PlayerStatisticsBuilder, RegionSnapshot, SeasonRank,
};
