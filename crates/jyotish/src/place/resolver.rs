//! Free-text place names to coordinates and a time-zone id.
//!
//! Input looks like `"Novo Mesto, Slovenia"` or just `"Ljubljana"`. The text
//! after the last comma is taken as a country qualifier. Matching runs in two
//! tiers: exact on the normalized name, then substring. A qualifier always has
//! to match the record's country code exactly. Multiple hits come back as an
//! ambiguity for the caller to present, most populous first.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::place::countries::CountryTable;
use crate::place::database::{PlaceDatabase, PlaceIndex};
use crate::place::record::{normalize_text, PlaceRecord};
use crate::place::zones::{NearestPlaceZones, ZoneFinder};

/// Upper bound on candidates reported for an ambiguous query.
pub const MAX_CANDIDATES: usize = 7;

/// A place pinned to coordinates and a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// "Name, CC" of the matched record
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone id
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlaceResolution {
    Resolved(ResolvedLocation),
    Ambiguous { candidates: Vec<String> },
    NotFound,
}

impl PlaceResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn location(&self) -> Option<&ResolvedLocation> {
        match self {
            Self::Resolved(loc) => Some(loc),
            _ => None,
        }
    }
}

/// Normalized query split into its name part and optional country code.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlaceQuery {
    name: String,
    country: Option<String>,
}

impl PlaceQuery {
    fn parse(text: &str, countries: &CountryTable) -> Option<Self> {
        let normalized = normalize_text(text);
        let (name, country) = match normalized.rsplit_once(',') {
            Some((name, qualifier)) => {
                let qualifier = qualifier.trim();
                let country = if qualifier.is_empty() {
                    None
                } else {
                    Some(countries.normalize(qualifier))
                };
                (name.trim().to_string(), country)
            }
            None => (normalized, None),
        };
        if name.is_empty() {
            return None;
        }
        Some(Self { name, country })
    }

    /// "name, cc" when qualified, bare name otherwise.
    fn key(&self) -> String {
        match &self.country {
            Some(cc) => format!("{}, {}", self.name, cc.to_lowercase()),
            None => self.name.clone(),
        }
    }
}

pub struct PlaceResolver<'a, Z: ZoneFinder = NearestPlaceZones<'a>> {
    database: &'a PlaceDatabase,
    countries: &'a CountryTable,
    zones: Z,
}

impl<'a> PlaceResolver<'a, NearestPlaceZones<'a>> {
    /// Resolver with the default country table and nearest-record zone lookup.
    pub fn new(database: &'a PlaceDatabase) -> Self {
        Self {
            database,
            countries: CountryTable::shared(),
            zones: NearestPlaceZones::new(database),
        }
    }
}

impl<'a, Z: ZoneFinder> PlaceResolver<'a, Z> {
    pub fn with_parts(database: &'a PlaceDatabase, countries: &'a CountryTable, zones: Z) -> Self {
        Self {
            database,
            countries,
            zones,
        }
    }

    pub fn resolve(&self, text: &str) -> PlaceResolution {
        let Some(query) = PlaceQuery::parse(text, self.countries) else {
            return PlaceResolution::NotFound;
        };
        let candidates = self.candidates(&query);
        debug!("Place query {:?} matched {} candidate(s)", query.key(), candidates.len());

        match candidates.as_slice() {
            [] => PlaceResolution::NotFound,
            [only] => match self.zones.zone_for(only.location()) {
                Some(timezone) => PlaceResolution::Resolved(ResolvedLocation {
                    name: only.display_name(),
                    latitude: only.latitude,
                    longitude: only.longitude,
                    timezone,
                }),
                None => PlaceResolution::Ambiguous {
                    candidates: vec![only.display_name()],
                },
            },
            many => PlaceResolution::Ambiguous {
                candidates: many
                    .iter()
                    .take(MAX_CANDIDATES)
                    .map(|r| r.display_name())
                    .collect(),
            },
        }
    }

    /// Deduplicated matches, most populous first.
    fn candidates(&self, query: &PlaceQuery) -> Vec<&'a PlaceRecord> {
        let database: &'a PlaceDatabase = self.database;
        let in_country = |record: &PlaceRecord| {
            query
                .country
                .as_deref()
                .map_or(true, |cc| record.country_code == cc)
        };

        let mut matched: Vec<(&'a PlaceRecord, &'a PlaceIndex)> = database
            .indexed()
            .filter(|(r, idx)| idx.name == query.name && in_country(*r))
            .collect();
        if matched.is_empty() {
            matched = database
                .indexed()
                .filter(|(r, idx)| idx.name.contains(query.name.as_str()) && in_country(*r))
                .collect();
        }

        let mut best: HashMap<(&'a str, &'a str), &'a PlaceRecord> = HashMap::new();
        for (record, idx) in matched {
            best.entry((idx.name.as_str(), record.country_code.as_str()))
                .and_modify(|kept| {
                    if record.population > kept.population {
                        *kept = record;
                    }
                })
                .or_insert(record);
        }

        let mut unique: Vec<&PlaceRecord> = best.into_values().collect();
        unique.sort_by(|a, b| {
            b.population
                .cmp(&a.population)
                .then_with(|| a.display_name().cmp(&b.display_name()))
        });
        unique
    }
}
