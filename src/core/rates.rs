//! Rate tables used by the calculators
//!
//! The tables are plain data. [`RateTables::standard`] returns the built-in
//! schedule shared by the whole process; alternative tables can be loaded from
//! JSON and injected into the engine (tests and what-if runs do this).

use super::error::RateTableError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::OnceLock;

/// Location code used when a location is absent or unknown
pub const DEFAULT_LOCATION: &str = "other-zone1";

/// Patent zone of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Zone {
    One,
    Two,
}

impl TryFrom<u8> for Zone {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Zone::One),
            2 => Ok(Zone::Two),
            other => Err(format!("unknown zone {other}, expected 1 or 2")),
        }
    }
}

impl From<Zone> for u8 {
    fn from(zone: Zone) -> Self {
        match zone {
            Zone::One => 1,
            Zone::Two => 2,
        }
    }
}

/// Rates that depend on where the taxpayer or property is located.
/// Percentages are stored as percent (17 means 17%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocationRateEntry {
    #[schemars(with = "u8")]
    pub zone: Zone,
    #[schemars(with = "f64")]
    pub patent_fixed_base: Decimal,
    #[schemars(with = "f64")]
    pub patent_proportional_rate: Decimal,
    #[schemars(with = "f64")]
    pub built_property_rate: Decimal,
    #[schemars(with = "f64")]
    pub non_built_property_rate: Decimal,
}

/// One bracket of a tier table. `upper_bound = None` means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Tier<T> {
    #[schemars(with = "Option<f64>")]
    pub upper_bound: Option<Decimal>,
    pub value: T,
}

impl<T> Tier<T> {
    pub fn contains(&self, amount: Decimal) -> bool {
        self.upper_bound.is_none_or(|bound| amount <= bound)
    }
}

/// Brackets ordered by ascending upper bound, the last one unbounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TierTable<T> {
    pub tiers: Vec<Tier<T>>,
}

/// Outcome of a table lookup, flagging when a fallback entry was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a, T> {
    pub entry: &'a T,
    pub defaulted: bool,
}

impl<T> TierTable<T> {
    fn from_pairs(pairs: impl IntoIterator<Item = (Option<Decimal>, T)>) -> Self {
        TierTable {
            tiers: pairs
                .into_iter()
                .map(|(upper_bound, value)| Tier { upper_bound, value })
                .collect(),
        }
    }

    /// First tier whose upper bound is at or above `amount`. When nothing
    /// matches, the terminal tier is returned and flagged as defaulted.
    pub fn resolve(&self, amount: Decimal) -> Option<Resolved<'_, Tier<T>>> {
        match self.tiers.iter().find(|tier| tier.contains(amount)) {
            Some(entry) => Some(Resolved {
                entry,
                defaulted: false,
            }),
            None => self.tiers.last().map(|entry| Resolved {
                entry,
                defaulted: true,
            }),
        }
    }

    fn validate(&self, table: &'static str) -> Result<(), RateTableError> {
        let last = self.tiers.len().checked_sub(1).ok_or(RateTableError::EmptyTable { table })?;
        let mut previous: Option<Decimal> = None;
        for (index, tier) in self.tiers.iter().enumerate() {
            match tier.upper_bound {
                Some(bound) => {
                    if previous.is_some_and(|p| bound <= p) {
                        return Err(RateTableError::UnorderedTiers { table, index });
                    }
                    previous = Some(bound);
                }
                None if index != last => {
                    return Err(RateTableError::UnboundedInnerTier { table, index })
                }
                None => {}
            }
        }
        if self.tiers[last].upper_bound.is_some() {
            return Err(RateTableError::BoundedTerminalTier { table });
        }
        Ok(())
    }
}

/// Chamber of commerce contribution by legal form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChamberFee {
    #[schemars(with = "f64")]
    pub individual: Decimal,
    #[schemars(with = "f64")]
    pub organization: Decimal,
}

/// Patent fixed right for importers and exporters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImportExportRight {
    #[schemars(with = "f64")]
    pub fixed_right: Decimal,
    /// Charged per started billion above the previous tier's bound
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub per_billion: Option<Decimal>,
}

/// All reference data the engine reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RateTables {
    pub default_location: String,
    pub locations: BTreeMap<String, LocationRateEntry>,
    pub chamber: TierTable<ChamberFee>,
    pub import_export: TierTable<ImportExportRight>,
}

impl RateTables {
    /// The built-in schedule, shared process-wide
    pub fn standard() -> &'static RateTables {
        static STANDARD: OnceLock<RateTables> = OnceLock::new();
        STANDARD.get_or_init(RateTables::benin)
    }

    /// Current Benin schedule
    pub fn benin() -> RateTables {
        let location = |zone, base, proportional, built, non_built| LocationRateEntry {
            zone,
            patent_fixed_base: base,
            patent_proportional_rate: proportional,
            built_property_rate: built,
            non_built_property_rate: non_built,
        };
        let locations = [
            ("cotonou", location(Zone::One, dec!(70000), dec!(17), dec!(6), dec!(5))),
            ("porto-novo", location(Zone::One, dec!(70000), dec!(17), dec!(15), dec!(4))),
            ("ouidah", location(Zone::One, dec!(70000), dec!(18), dec!(25), dec!(5))),
            ("abomey", location(Zone::One, dec!(70000), dec!(14), dec!(28), dec!(5.6))),
            ("parakou", location(Zone::Two, dec!(60000), dec!(25), dec!(30), dec!(6))),
            ("other-zone1", location(Zone::One, dec!(70000), dec!(13), dec!(15), dec!(4))),
            ("other-zone2", location(Zone::Two, dec!(60000), dec!(15), dec!(24), dec!(4))),
        ]
        .into_iter()
        .map(|(code, entry)| (code.to_string(), entry))
        .collect();

        let fee = |individual, organization| ChamberFee {
            individual,
            organization,
        };
        let chamber = TierTable::from_pairs([
            (Some(dec!(5000000)), fee(dec!(20000), dec!(100000))),
            (Some(dec!(25000000)), fee(dec!(50000), dec!(200000))),
            (Some(dec!(50000000)), fee(dec!(150000), dec!(300000))),
            (Some(dec!(400000000)), fee(dec!(400000), dec!(400000))),
            (Some(dec!(800000000)), fee(dec!(600000), dec!(600000))),
            (Some(dec!(1000000000)), fee(dec!(800000), dec!(800000))),
            (Some(dec!(2000000000)), fee(dec!(1200000), dec!(1200000))),
            (Some(dec!(4000000000)), fee(dec!(1600000), dec!(1600000))),
            (None, fee(dec!(2000000), dec!(2000000))),
        ]);

        let right = |fixed_right, per_billion| ImportExportRight {
            fixed_right,
            per_billion,
        };
        let import_export = TierTable::from_pairs([
            (Some(dec!(80000000)), right(dec!(150000), None)),
            (Some(dec!(200000000)), right(dec!(337500), None)),
            (Some(dec!(500000000)), right(dec!(525000), None)),
            (Some(dec!(1000000000)), right(dec!(675000), None)),
            (Some(dec!(2000000000)), right(dec!(900000), None)),
            (Some(dec!(10000000000)), right(dec!(1125000), None)),
            (None, right(dec!(1125000), Some(dec!(10000)))),
        ]);

        RateTables {
            default_location: DEFAULT_LOCATION.to_string(),
            locations,
            chamber,
            import_export,
        }
    }

    /// Load and validate tables from JSON
    pub fn read_json<R: Read>(reader: R) -> anyhow::Result<RateTables> {
        let tables: RateTables = serde_json::from_reader(reader)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> Result<(), RateTableError> {
        if !self.locations.contains_key(&self.default_location) {
            return Err(RateTableError::MissingDefaultLocation(
                self.default_location.clone(),
            ));
        }
        self.chamber.validate("chamber")?;
        self.import_export.validate("import/export")?;
        Ok(())
    }

    /// Rate entry for a location code, falling back to the default location
    pub fn resolve_location(&self, code: Option<&str>) -> Resolved<'_, LocationRateEntry> {
        if let Some(entry) = code.and_then(|c| self.locations.get(c)) {
            return Resolved {
                entry,
                defaulted: false,
            };
        }
        log::warn!(
            "Location {:?} not in rate table, using {}",
            code,
            self.default_location
        );
        Resolved {
            entry: self.default_entry(),
            defaulted: true,
        }
    }

    fn default_entry(&self) -> &LocationRateEntry {
        match self.locations.get(&self.default_location) {
            Some(entry) => entry,
            // validate() guarantees the default is present; an invalid table
            // still resolves to a deterministic entry.
            None => self
                .locations
                .values()
                .next()
                .unwrap_or(&FALLBACK_LOCATION),
        }
    }

    /// Upper bound of the last bounded import/export tier, where the
    /// per-billion surcharge starts
    pub fn import_export_surcharge_floor(&self) -> Decimal {
        self.import_export
            .tiers
            .iter()
            .filter_map(|tier| tier.upper_bound)
            .last()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for RateTables {
    fn default() -> Self {
        RateTables::benin()
    }
}

const FALLBACK_LOCATION: LocationRateEntry = LocationRateEntry {
    zone: Zone::One,
    patent_fixed_base: dec!(70000),
    patent_proportional_rate: dec!(13),
    built_property_rate: dec!(15),
    non_built_property_rate: dec!(4),
};
