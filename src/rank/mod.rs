//! Matchmaking rating to competitive tier classification.
//!
//! Every game era used its own MMR breakpoints, and sources report MMR from
//! different eras. Each era is a named [`BreakpointTable`]; [`classify`] walks
//! whichever table it is handed, so adding a season's table never touches the
//! lookup itself.

pub mod tables;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::R6sError;

pub use tables::{CLASSIC, CRYSTAL_GUARD, RANKED_TWO, STEEL_WAVE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tier {
    Copper,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Champion,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Division inside a tier, V being the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Division {
    V,
    IV,
    III,
    II,
    I,
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Lowest MMR at which `tier`/`division` is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub threshold: f64,
    pub tier: Tier,
    pub division: Option<Division>,
}

impl Breakpoint {
    pub const fn new(threshold: f64, tier: Tier, division: Option<Division>) -> Self {
        Self {
            threshold,
            tier,
            division,
        }
    }
}

/// Named, ordered breakpoint list. Thresholds ascend strictly.
#[derive(Debug)]
pub struct BreakpointTable {
    pub name: &'static str,
    pub breakpoints: &'static [Breakpoint],
}

/// Human-readable tier with its position in the table it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierLabel {
    pub tier: Tier,
    pub division: Option<Division>,
    /// Index in the source table; higher is better.
    pub ordinal: usize,
    pub table: &'static str,
}

impl fmt::Display for TierLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.division {
            Some(division) => write!(f, "{} {}", self.tier, division),
            None => write!(f, "{}", self.tier),
        }
    }
}

/// Classify `mmr` against `table`.
///
/// Values under the first threshold (and NaN) clamp to the lowest entry;
/// anything above the last threshold is the top label.
///
/// # Examples
///
/// ```rust
/// use r6s_stats::rank::{classify, Tier, STEEL_WAVE};
///
/// let label = classify(2850.0, &STEEL_WAVE);
/// assert_eq!(label.tier, Tier::Gold);
/// assert_eq!(label.to_string(), "Gold II");
/// ```
pub fn classify(mmr: f64, table: &'static BreakpointTable) -> TierLabel {
    let ordinal = if mmr.is_nan() {
        0
    } else {
        table
            .breakpoints
            .iter()
            .rposition(|b| mmr >= b.threshold)
            .unwrap_or(0)
    };

    match table.breakpoints.get(ordinal) {
        Some(b) => TierLabel {
            tier: b.tier,
            division: b.division,
            ordinal,
            table: table.name,
        },
        // Empty table: nothing to compare against.
        None => TierLabel {
            tier: Tier::Copper,
            division: None,
            ordinal: 0,
            table: table.name,
        },
    }
}

/// Registry of the shipped breakpoint tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableVersion {
    /// 500-point tiers with a flat champion label from 4000.
    Classic,
    /// Ranked 1.0, operation Steel Wave era.
    SteelWave,
    /// Ranked 1.0, operation Crystal Guard era onwards.
    #[default]
    CrystalGuard,
    /// Ranked 2.0 rank points, floored at 1000.
    RankedTwo,
}

impl TableVersion {
    pub fn all() -> [TableVersion; 4] {
        [
            TableVersion::Classic,
            TableVersion::SteelWave,
            TableVersion::CrystalGuard,
            TableVersion::RankedTwo,
        ]
    }

    pub fn table(&self) -> &'static BreakpointTable {
        match self {
            TableVersion::Classic => &CLASSIC,
            TableVersion::SteelWave => &STEEL_WAVE,
            TableVersion::CrystalGuard => &CRYSTAL_GUARD,
            TableVersion::RankedTwo => &RANKED_TWO,
        }
    }

    pub fn name(&self) -> &'static str {
        self.table().name
    }
}

impl FromStr for TableVersion {
    type Err = R6sError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableVersion::all()
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| R6sError::Config {
                message: format!("unknown rank table: {s}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_ascend_strictly() {
        for version in TableVersion::all() {
            let table = version.table();
            for pair in table.breakpoints.windows(2) {
                assert!(
                    pair[0].threshold < pair[1].threshold,
                    "{} is not ascending at {}",
                    table.name,
                    pair[1].threshold
                );
            }
        }
    }

    #[test]
    fn test_classify_monotonic_for_every_table() {
        for version in TableVersion::all() {
            let table = version.table();
            let mut previous = classify(-500.0, table);
            let mut mmr = -500.0;
            while mmr <= 7000.0 {
                let current = classify(mmr, table);
                assert!(
                    current.ordinal >= previous.ordinal,
                    "{}: {} ranked below {}",
                    table.name,
                    mmr,
                    mmr - 10.0
                );
                assert!(current.tier >= previous.tier);
                previous = current;
                mmr += 10.0;
            }
        }
    }

    #[test]
    fn test_classify_clamps_low() {
        for version in TableVersion::all() {
            let table = version.table();
            let zero = classify(0.0, table);
            let negative = classify(-100.0, table);
            assert_eq!(zero.ordinal, 0);
            assert_eq!(negative.ordinal, 0);
            assert_eq!(zero.tier, Tier::Copper);
            assert_eq!(zero.division, Some(Division::V));
        }
    }

    #[test]
    fn test_classify_clamps_high() {
        for version in TableVersion::all() {
            let table = version.table();
            let label = classify(100_000.0, table);
            assert_eq!(label.ordinal, table.breakpoints.len() - 1);
            assert_eq!(label.tier, Tier::Champion);
            assert_eq!(label.division, None);
            assert_eq!(label.to_string(), "Champion");
        }
    }

    #[test]
    fn test_classify_nan_is_lowest() {
        assert_eq!(classify(f64::NAN, &CRYSTAL_GUARD).ordinal, 0);
    }

    #[test]
    fn test_classic_table_labels() {
        assert_eq!(classify(50.0, &CLASSIC).to_string(), "Copper V");
        assert_eq!(classify(450.0, &CLASSIC).to_string(), "Copper I");
        assert_eq!(classify(1720.0, &CLASSIC).to_string(), "Gold III");
        assert_eq!(classify(2999.0, &CLASSIC).to_string(), "Emerald I");
        assert_eq!(classify(3750.0, &CLASSIC).to_string(), "Diamond I");
        assert_eq!(classify(4000.0, &CLASSIC).to_string(), "Champion");
    }

    #[test]
    fn test_steel_wave_labels() {
        assert_eq!(classify(1150.0, &STEEL_WAVE).to_string(), "Copper V");
        assert_eq!(classify(1500.0, &STEEL_WAVE).to_string(), "Copper I");
        assert_eq!(classify(2100.0, &STEEL_WAVE).to_string(), "Silver V");
        assert_eq!(classify(3500.0, &STEEL_WAVE).to_string(), "Platinum III");
        assert_eq!(classify(4200.0, &STEEL_WAVE).to_string(), "Platinum I");
        assert_eq!(classify(4600.0, &STEEL_WAVE).to_string(), "Diamond");
        assert_eq!(classify(5000.0, &STEEL_WAVE).to_string(), "Champion");
    }

    #[test]
    fn test_crystal_guard_labels() {
        assert_eq!(classify(2599.0, &CRYSTAL_GUARD).to_string(), "Silver I");
        assert_eq!(classify(2799.0, &CRYSTAL_GUARD).to_string(), "Gold III");
        assert_eq!(classify(3499.0, &CRYSTAL_GUARD).to_string(), "Platinum III");
        assert_eq!(classify(3500.0, &CRYSTAL_GUARD).to_string(), "Platinum II");
        assert_eq!(classify(4100.0, &CRYSTAL_GUARD).to_string(), "Diamond III");
        assert_eq!(classify(4999.0, &CRYSTAL_GUARD).to_string(), "Diamond I");
    }

    #[test]
    fn test_ranked_two_labels() {
        assert_eq!(classify(999.0, &RANKED_TWO).to_string(), "Copper V");
        assert_eq!(classify(1000.0, &RANKED_TWO).to_string(), "Copper V");
        assert_eq!(classify(1100.0, &RANKED_TWO).to_string(), "Copper IV");
        assert_eq!(classify(2600.0, &RANKED_TWO).to_string(), "Gold IV");
        assert_eq!(classify(4200.0, &RANKED_TWO).to_string(), "Diamond III");
        assert_eq!(classify(4499.0, &RANKED_TWO).to_string(), "Diamond I");
        assert_eq!(classify(4500.0, &RANKED_TWO).to_string(), "Champion");
    }

    #[test]
    fn test_same_mmr_differs_between_tables() {
        let classic = classify(3200.0, &CLASSIC);
        let modern = classify(3200.0, &CRYSTAL_GUARD);
        assert_eq!(classic.tier, Tier::Diamond);
        assert_eq!(modern.tier, Tier::Platinum);
        assert_eq!(classic.table, "classic");
        assert_eq!(modern.table, "crystal-guard");
    }

    #[test]
    fn test_table_version_from_str() {
        assert_eq!(
            "Steel-Wave".parse::<TableVersion>().unwrap(),
            TableVersion::SteelWave
        );
        assert_eq!(
            "ranked-two".parse::<TableVersion>().unwrap(),
            TableVersion::RankedTwo
        );
        assert!("season-99".parse::<TableVersion>().is_err());
    }
}
