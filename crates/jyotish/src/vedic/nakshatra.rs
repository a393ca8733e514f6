//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::{Deserialize, Serialize};

use crate::angle::normalize_degrees;
use crate::vedic::types::Planet;

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display_name, planetary lord)
pub const NAKSHATRA_ORDER: &[(&str, &str, Planet)] = &[
    ("ashwini", "Ashwini", Planet::Ketu),
    ("bharani", "Bharani", Planet::Venus),
    ("krittika", "Krittika", Planet::Sun),
    ("rohini", "Rohini", Planet::Moon),
    ("mrigashira", "Mrigashira", Planet::Mars),
    ("ardra", "Ardra", Planet::Rahu),
    ("punarvasu", "Punarvasu", Planet::Jupiter),
    ("pushya", "Pushya", Planet::Saturn),
    ("ashlesha", "Ashlesha", Planet::Mercury),
    ("magha", "Magha", Planet::Ketu),
    ("purva_phalguni", "Purva Phalguni", Planet::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Planet::Sun),
    ("hasta", "Hasta", Planet::Moon),
    ("chitra", "Chitra", Planet::Mars),
    ("swati", "Swati", Planet::Rahu),
    ("vishakha", "Vishakha", Planet::Jupiter),
    ("anuradha", "Anuradha", Planet::Saturn),
    ("jyeshtha", "Jyeshtha", Planet::Mercury),
    ("mula", "Mula", Planet::Ketu),
    ("purva_ashadha", "Purva Ashadha", Planet::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Planet::Sun),
    ("shravana", "Shravana", Planet::Moon),
    ("dhanishta", "Dhanishta", Planet::Mars),
    ("shatabhisha", "Shatabhisha", Planet::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Planet::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Planet::Saturn),
    ("revati", "Revati", Planet::Mercury),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseNakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: Planet,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraMetadata {
    #[serde(flatten)]
    pub base: BaseNakshatraRecord,
    pub offset: f64,
    pub progress: f64,
    pub pada: i32,
    pub pada_fraction: f64,
}

fn build_nakshatra_table() -> Vec<BaseNakshatraRecord> {
    let mut table = Vec::new();
    for (idx, (slug, display_name, lord)) in NAKSHATRA_ORDER.iter().enumerate() {
        let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
        let end = start + NAKSHATRA_SEGMENT_SIZE;
        table.push(BaseNakshatraRecord {
            id: slug.to_string(),
            name: display_name.to_string(),
            lord: *lord,
            start,
            end,
            index: idx,
        });
    }
    table
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<BaseNakshatraRecord> = build_nakshatra_table();
}

/// Nakshatra index 0..=26 for a sidereal longitude:
/// `floor((lon / 360) * 27) mod 27`.
pub fn nakshatra_index(longitude: f64) -> usize {
    let lon = normalize_degrees(longitude);
    ((lon / 360.0 * NAKSHATRA_COUNT as f64).floor() as usize) % NAKSHATRA_COUNT
}

/// Return metadata for the nakshatra containing the given longitude.
///
/// Returns a struct containing id, name, lord, index, start/end degrees,
/// within-nakshatra offset, pada number, and pada fraction.
pub fn get_nakshatra_for_longitude(longitude: f64) -> NakshatraMetadata {
    let lon = normalize_degrees(longitude);
    let index = nakshatra_index(lon);
    let entry = &NAKSHATRA_TABLE[index];

    let offset = (lon - entry.start).max(0.0);
    let pada = ((offset / PADA_SIZE) as i32 + 1).min(4);
    let pada_offset = offset - ((pada - 1) as f64 * PADA_SIZE);
    let pada_fraction = pada_offset / PADA_SIZE;

    NakshatraMetadata {
        base: entry.clone(),
        offset,
        progress: offset / NAKSHATRA_SEGMENT_SIZE,
        pada,
        pada_fraction,
    }
}

/// The Moon's nakshatra as reported in a chart payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonNakshatra {
    pub index: usize,
    pub name: String,
    pub pada: i32,
    pub lord: Planet,
    /// Descriptive label; from the chart text provider when available
    pub text: String,
}

impl MoonNakshatra {
    /// Derive from the Moon's sidereal longitude, with a generated label.
    pub fn from_longitude(moon_longitude: f64) -> Self {
        let meta = get_nakshatra_for_longitude(moon_longitude);
        let text = format!("{} (pada {})", meta.base.name, meta.pada);
        Self {
            index: meta.base.index,
            name: meta.base.name,
            pada: meta.pada,
            lord: meta.base.lord,
            text,
        }
    }
}
