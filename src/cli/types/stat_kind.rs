//! Which slice of a player's statistics a lookup asks for.

use crate::error::R6sError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatKind {
    /// Level and overall numbers.
    #[default]
    Basic,
    /// Casual/ranked split with MMR and tiers.
    Detail,
    /// Per-operator breakdown.
    Operators,
    /// Most recent matches.
    RecentPlays,
}

impl StatKind {
    pub fn all() -> [StatKind; 4] {
        [
            StatKind::Basic,
            StatKind::Detail,
            StatKind::Operators,
            StatKind::RecentPlays,
        ]
    }

    /// Title handed to the renderer alongside the statistics.
    pub fn title(&self) -> &'static str {
        match self {
            StatKind::Basic => "Overview",
            StatKind::Detail => "Casual & Ranked",
            StatKind::Operators => "Top Operators",
            StatKind::RecentPlays => "Recent Matches",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatKind::Basic => "basic",
            StatKind::Detail => "detail",
            StatKind::Operators => "operators",
            StatKind::RecentPlays => "recent-plays",
        };
        write!(f, "{s}")
    }
}

impl FromStr for StatKind {
    type Err = R6sError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "base" => Ok(StatKind::Basic),
            "detail" | "pro" => Ok(StatKind::Detail),
            "operators" | "ops" => Ok(StatKind::Operators),
            "recent-plays" | "recent" | "plays" => Ok(StatKind::RecentPlays),
            _ => Err(R6sError::InvalidStatKind {
                kind: s.to_string(),
            }),
        }
    }
}
