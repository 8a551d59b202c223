//! Source payload to canonical model.
//!
//! Every source registers a [`SourceMapping`]: a typed mapping function, the
//! rank table its MMR values belong to, and where in the raw payload its
//! ranked/casual MMR lives. [`Normalizer::normalize`] runs the same steps for
//! every source and never looks at the source name beyond the table lookup.

pub mod de;
pub mod r6scn;
pub mod statsdb;
pub mod tracker;
pub mod ubisoft;

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Settings;
use crate::error::{R6sError, Result};
use crate::rank::TableVersion;
use crate::sources::{RawPayload, R6DB, R6SCN, R6TRACKER, UBISOFT};
use crate::stats::{GameMode, ModeStat, PlayerStatistics, PlayerStatisticsBuilder};

pub type MapFn = fn(&RawPayload) -> Result<PlayerStatisticsBuilder>;

/// JSON pointers to the ranked and casual MMR inside a raw payload.
///
/// A configured pointer always wins over what the mapping function found;
/// `None` keeps the mapping's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmrSourcing {
    #[serde(default)]
    pub ranked: Option<String>,
    #[serde(default)]
    pub casual: Option<String>,
}

impl MmrSourcing {
    pub fn new(ranked: &str, casual: &str) -> Self {
        Self {
            ranked: Some(ranked.to_string()),
            casual: Some(casual.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceMapping {
    pub map: MapFn,
    pub table: TableVersion,
    pub mmr: MmrSourcing,
}

pub struct Normalizer {
    mappings: BTreeMap<&'static str, SourceMapping>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Normalizer {
    pub fn empty() -> Self {
        Self {
            mappings: BTreeMap::new(),
        }
    }

    /// The four shipped sources with their built-in MMR pointers.
    pub fn with_defaults() -> Self {
        let mut normalizer = Self::empty();
        normalizer.register(
            R6SCN,
            SourceMapping {
                map: r6scn::map,
                table: TableVersion::CrystalGuard,
                mmr: MmrSourcing::new("/Basicstat/0/mmr", "/Casualstat/mmr"),
            },
        );
        normalizer.register(
            R6TRACKER,
            SourceMapping {
                map: tracker::map,
                table: TableVersion::CrystalGuard,
                mmr: MmrSourcing::new("/userMainData/ranked/mmr", "/userMainData/casual/mmr"),
            },
        );
        normalizer.register(
            R6DB,
            SourceMapping {
                map: statsdb::map,
                table: TableVersion::SteelWave,
                mmr: MmrSourcing::new(
                    "/payload/stats/seasonal/ranked/mmr",
                    "/payload/stats/seasonal/casual/mmr",
                ),
            },
        );
        normalizer.register(
            UBISOFT,
            SourceMapping {
                map: ubisoft::map,
                table: TableVersion::RankedTwo,
                // Board order varies; the mapping picks boards by id.
                mmr: MmrSourcing::default(),
            },
        );
        normalizer
    }

    /// Defaults plus the per-source MMR pointer overrides from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut normalizer = Self::with_defaults();
        for (source, sourcing) in &settings.mmr_overrides {
            match normalizer.mappings.get_mut(source.as_str()) {
                Some(mapping) => {
                    debug!("using configured MMR pointers for {source}: {sourcing:?}");
                    mapping.mmr = sourcing.clone();
                }
                None => warn!("ignoring MMR pointers for unknown source {source}"),
            }
        }
        normalizer
    }

    pub fn register(&mut self, source: &'static str, mapping: SourceMapping) {
        self.mappings.insert(source, mapping);
    }

    pub fn mapping(&self, source: &str) -> Option<&SourceMapping> {
        self.mappings.get(source)
    }

    pub fn sources(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.mappings.keys().copied()
    }

    pub fn normalize(&self, source_name: &str, raw: &RawPayload) -> Result<PlayerStatistics> {
        let mapping = self
            .mapping(source_name)
            .ok_or_else(|| R6sError::InvalidSource {
                name: source_name.to_string(),
            })?;

        let mut builder = (mapping.map)(raw)?;
        apply_mmr_sourcing(&mut builder, &mapping.mmr, &raw.body);
        builder.annotate_tiers(mapping.table.table());
        Ok(builder.build())
    }
}

/// Normalize with the shipped mappings.
pub fn normalize(source_name: &str, raw: &RawPayload) -> Result<PlayerStatistics> {
    Normalizer::with_defaults().normalize(source_name, raw)
}

fn apply_mmr_sourcing(builder: &mut PlayerStatisticsBuilder, sourcing: &MmrSourcing, body: &Value) {
    if let Some(pointer) = &sourcing.ranked {
        set_mode_mmr(&mut builder.ranked, GameMode::Ranked, resolve_pointer(body, pointer));
    }
    if let Some(pointer) = &sourcing.casual {
        set_mode_mmr(&mut builder.casual, GameMode::Casual, resolve_pointer(body, pointer));
    }
}

fn set_mode_mmr(slot: &mut Option<ModeStat>, mode: GameMode, mmr: Option<f64>) {
    match (slot.as_mut(), mmr) {
        (Some(stat), mmr) => stat.mmr = mmr,
        (None, Some(mmr)) => {
            let mut stat = ModeStat::empty(mode);
            stat.mmr = Some(mmr);
            *slot = Some(stat);
        }
        (None, None) => {}
    }
}

pub fn resolve_pointer(body: &Value, pointer: &str) -> Option<f64> {
    body.pointer(pointer).and_then(de::value_as_f64)
}

/// Deserialize a raw body into a source's typed shape, reporting any
/// mismatch as a malformed response.
pub(crate) fn decode<T>(source_name: &str, body: &Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(body).map_err(|e| R6sError::malformed(source_name, e.to_string()))
}

#[cfg(test)]
mod tests;
