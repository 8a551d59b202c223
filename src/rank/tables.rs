//! Shipped MMR breakpoint tables.

use super::{Breakpoint, BreakpointTable, Division, Tier};

const fn bp(threshold: f64, tier: Tier, division: Division) -> Breakpoint {
    Breakpoint::new(threshold, tier, Some(division))
}

const fn flat(threshold: f64, tier: Tier) -> Breakpoint {
    Breakpoint::new(threshold, tier, None)
}

use super::Division::{I, II, III, IV, V};
use super::Tier::{Bronze, Champion, Copper, Diamond, Emerald, Gold, Platinum, Silver};

/// Seven 500-point tiers of five 100-point divisions from 0. Diamond I
/// holds until the flat champion label at 4000.
pub static CLASSIC: BreakpointTable = BreakpointTable {
    name: "classic",
    breakpoints: &[
        bp(0.0, Copper, V),
        bp(100.0, Copper, IV),
        bp(200.0, Copper, III),
        bp(300.0, Copper, II),
        bp(400.0, Copper, I),
        bp(500.0, Bronze, V),
        bp(600.0, Bronze, IV),
        bp(700.0, Bronze, III),
        bp(800.0, Bronze, II),
        bp(900.0, Bronze, I),
        bp(1000.0, Silver, V),
        bp(1100.0, Silver, IV),
        bp(1200.0, Silver, III),
        bp(1300.0, Silver, II),
        bp(1400.0, Silver, I),
        bp(1500.0, Gold, V),
        bp(1600.0, Gold, IV),
        bp(1700.0, Gold, III),
        bp(1800.0, Gold, II),
        bp(1900.0, Gold, I),
        bp(2000.0, Platinum, V),
        bp(2100.0, Platinum, IV),
        bp(2200.0, Platinum, III),
        bp(2300.0, Platinum, II),
        bp(2400.0, Platinum, I),
        bp(2500.0, Emerald, V),
        bp(2600.0, Emerald, IV),
        bp(2700.0, Emerald, III),
        bp(2800.0, Emerald, II),
        bp(2900.0, Emerald, I),
        bp(3000.0, Diamond, V),
        bp(3100.0, Diamond, IV),
        bp(3200.0, Diamond, III),
        bp(3300.0, Diamond, II),
        bp(3400.0, Diamond, I),
        flat(4000.0, Champion),
    ],
};

/// 100-point divisions up to Silver I, 200-point Gold, 400-point Platinum,
/// a single Diamond band and Champion from 5000.
pub static STEEL_WAVE: BreakpointTable = BreakpointTable {
    name: "steel-wave",
    breakpoints: &[
        bp(0.0, Copper, V),
        bp(1200.0, Copper, IV),
        bp(1300.0, Copper, III),
        bp(1400.0, Copper, II),
        bp(1500.0, Copper, I),
        bp(1600.0, Bronze, V),
        bp(1700.0, Bronze, IV),
        bp(1800.0, Bronze, III),
        bp(1900.0, Bronze, II),
        bp(2000.0, Bronze, I),
        bp(2100.0, Silver, V),
        bp(2200.0, Silver, IV),
        bp(2300.0, Silver, III),
        bp(2400.0, Silver, II),
        bp(2500.0, Silver, I),
        bp(2600.0, Gold, III),
        bp(2800.0, Gold, II),
        bp(3000.0, Gold, I),
        bp(3200.0, Platinum, III),
        bp(3600.0, Platinum, II),
        bp(4000.0, Platinum, I),
        flat(4400.0, Diamond),
        flat(5000.0, Champion),
    ],
};

/// Same low end as Steel Wave; Platinum and Diamond split into three
/// 300-point divisions each.
pub static CRYSTAL_GUARD: BreakpointTable = BreakpointTable {
    name: "crystal-guard",
    breakpoints: &[
        bp(0.0, Copper, V),
        bp(1200.0, Copper, IV),
        bp(1300.0, Copper, III),
        bp(1400.0, Copper, II),
        bp(1500.0, Copper, I),
        bp(1600.0, Bronze, V),
        bp(1700.0, Bronze, IV),
        bp(1800.0, Bronze, III),
        bp(1900.0, Bronze, II),
        bp(2000.0, Bronze, I),
        bp(2100.0, Silver, V),
        bp(2200.0, Silver, IV),
        bp(2300.0, Silver, III),
        bp(2400.0, Silver, II),
        bp(2500.0, Silver, I),
        bp(2600.0, Gold, III),
        bp(2800.0, Gold, II),
        bp(3000.0, Gold, I),
        bp(3200.0, Platinum, III),
        bp(3500.0, Platinum, II),
        bp(3800.0, Platinum, I),
        bp(4100.0, Diamond, III),
        bp(4400.0, Diamond, II),
        bp(4700.0, Diamond, I),
        flat(5000.0, Champion),
    ],
};

/// Ranked 2.0 rank points: seven 500-point tiers of five 100-point divisions
/// from 1000, Champion from 4500.
pub static RANKED_TWO: BreakpointTable = BreakpointTable {
    name: "ranked-two",
    breakpoints: &[
        bp(1000.0, Copper, V),
        bp(1100.0, Copper, IV),
        bp(1200.0, Copper, III),
        bp(1300.0, Copper, II),
        bp(1400.0, Copper, I),
        bp(1500.0, Bronze, V),
        bp(1600.0, Bronze, IV),
        bp(1700.0, Bronze, III),
        bp(1800.0, Bronze, II),
        bp(1900.0, Bronze, I),
        bp(2000.0, Silver, V),
        bp(2100.0, Silver, IV),
        bp(2200.0, Silver, III),
        bp(2300.0, Silver, II),
        bp(2400.0, Silver, I),
        bp(2500.0, Gold, V),
        bp(2600.0, Gold, IV),
        bp(2700.0, Gold, III),
        bp(2800.0, Gold, II),
        bp(2900.0, Gold, I),
        bp(3000.0, Platinum, V),
        bp(3100.0, Platinum, IV),
        bp(3200.0, Platinum, III),
        bp(3300.0, Platinum, II),
        bp(3400.0, Platinum, I),
        bp(3500.0, Emerald, V),
        bp(3600.0, Emerald, IV),
        bp(3700.0, Emerald, III),
        bp(3800.0, Emerald, II),
        bp(3900.0, Emerald, I),
        bp(4000.0, Diamond, V),
        bp(4100.0, Diamond, IV),
        bp(4200.0, Diamond, III),
        bp(4300.0, Diamond, II),
        bp(4400.0, Diamond, I),
        flat(4500.0, Champion),
    ],
};
