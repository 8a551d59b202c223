use std::cmp::Ordering;
use std::fmt;

use super::types::SeasonRank;


/// Rendered when a ratio's denominator is zero.
pub const INFINITE_SENTINEL: &str = "∞";
/// Rendered when a metric cannot be computed from what the source supplied.
pub const UNKNOWN_SENTINEL: &str = "Unknown";

/// Quotient of two counters, e.g. kills/deaths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Value(f64),
    Infinite,
    Unknown,
}

impl Ratio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{v:.2}"),
            Ratio::Infinite => f.write_str(INFINITE_SENTINEL),
            Ratio::Unknown => f.write_str(UNKNOWN_SENTINEL),
        }
    }
}

/// Share of a whole as a percentage, e.g. won/played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentage {
    Value(f64),
    Unknown,
}

impl Percentage {
    pub fn value(&self) -> Option<f64> {
        match self {
            Percentage::Value(v) => Some(*v),
            Percentage::Unknown => None,
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Value(v) => write!(f, "{v:.2}%"),
            Percentage::Unknown => f.write_str(UNKNOWN_SENTINEL),
        }
    }
}

pub fn ratio(numerator: Option<u64>, denominator: Option<u64>) -> Ratio {
    match (numerator, denominator) {
        (Some(_), Some(0)) => Ratio::Infinite,
        (Some(n), Some(d)) => Ratio::Value(n as f64 / d as f64),
        _ => Ratio::Unknown,
    }
}

pub fn percentage(part: Option<u64>, whole: Option<u64>) -> Percentage {
    match (part, whole) {
        (Some(p), Some(w)) if w > 0 => Percentage::Value(p as f64 / w as f64 * 100.0),
        _ => Percentage::Unknown,
    }
}

/// Seconds to hours, for display.
pub fn hours(seconds: u64) -> f64 {
    seconds as f64 / 3600.0
}

/// Keep the first record per season id, preserving feed order.
pub fn dedup_seasons(raw: &[SeasonRank]) -> Vec<SeasonRank> {
    let mut seen = Vec::with_capacity(raw.len());
    let mut unique = Vec::with_capacity(raw.len());
    for season in raw {
        if !seen.contains(&season.season) {
            seen.push(season.season);
            unique.push(season.clone());
        }
    }
    unique
}

/// Season with the highest peak MMR across every raw record, repeats
/// included. Ties keep the earliest record.
pub fn historical_peak(raw: &[SeasonRank]) -> Option<SeasonRank> {
    let mut sorted: Vec<&SeasonRank> = raw.iter().filter(|s| s.max_mmr.is_some()).collect();
    sorted.sort_by(|a, b| compare_peak(b, a));
    sorted.first().map(|s| (*s).clone())
}

fn compare_peak(a: &SeasonRank, b: &SeasonRank) -> Ordering {
    let a = a.max_mmr.unwrap_or(f64::NEG_INFINITY);
    let b = b.max_mmr.unwrap_or(f64::NEG_INFINITY);
    a.total_cmp(&b)
}
