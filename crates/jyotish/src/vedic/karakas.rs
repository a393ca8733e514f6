//! Jaimini Chara Karakas.
//!
//! Planets are ranked by how far they have travelled through their sign.
//! Rahu moves backwards, so its distance is counted from the end of the sign
//! (`30 - deg_in_sign`). Ketu never takes part. Exact ties go to the planet
//! that comes first in the fixed order Sun, Moon, Mars, Mercury, Jupiter,
//! Venus, Saturn, Rahu.
//!
//! The 7- and 8-karaka schemes are cut from one sorted merit list, so a
//! planet's rank relative to the others is the same in both.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::fmt;

use crate::angle::degrees_in_sign;
use crate::vedic::types::{Planet, SiderealLongitudes, COMPUTED_PLANETS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
pub enum KarakaLabel {
    /// Atma karaka
    AK,
    /// Amatya karaka
    AmK,
    /// Bhratri karaka
    BK,
    /// Matri karaka
    MK,
    /// Pitri karaka (8-karaka scheme only)
    PiK,
    /// Putra karaka
    PK,
    /// Gnati karaka
    GK,
    /// Dara karaka
    DK,
}

pub const SEVEN_KARAKA_LABELS: [KarakaLabel; 7] = [
    KarakaLabel::AK,
    KarakaLabel::AmK,
    KarakaLabel::BK,
    KarakaLabel::MK,
    KarakaLabel::PK,
    KarakaLabel::GK,
    KarakaLabel::DK,
];

pub const EIGHT_KARAKA_LABELS: [KarakaLabel; 8] = [
    KarakaLabel::AK,
    KarakaLabel::AmK,
    KarakaLabel::BK,
    KarakaLabel::MK,
    KarakaLabel::PiK,
    KarakaLabel::PK,
    KarakaLabel::GK,
    KarakaLabel::DK,
];

impl KarakaLabel {
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::AK => "AK",
            Self::AmK => "AmK",
            Self::BK => "BK",
            Self::MK => "MK",
            Self::PiK => "PiK",
            Self::PK => "PK",
            Self::GK => "GK",
            Self::DK => "DK",
        }
    }
}

impl fmt::Display for KarakaLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// One populated label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KarakaSlot {
    pub label: KarakaLabel,
    pub planet: Planet,
    pub merit: f64,
}

/// Labels in priority order, each held by a distinct planet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KarakaAssignment {
    slots: Vec<KarakaSlot>,
}

impl KarakaAssignment {
    pub fn get(&self, label: KarakaLabel) -> Option<Planet> {
        self.slots.iter().find(|s| s.label == label).map(|s| s.planet)
    }

    pub fn slots(&self) -> &[KarakaSlot] {
        &self.slots
    }

    /// Planets from highest to lowest merit.
    pub fn planets(&self) -> Vec<Planet> {
        self.slots.iter().map(|s| s.planet).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Serialize for KarakaAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for slot in &self.slots {
            map.serialize_entry(slot.label.abbreviation(), slot.planet.name())?;
        }
        map.end()
    }
}

/// Both karaka schemes for one chart.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CharaKarakas {
    /// Sun..Saturn only
    pub seven: KarakaAssignment,
    /// Sun..Saturn plus Rahu
    pub eight: KarakaAssignment,
}

/// Ranking merit of a planet, in [0, 30]. `None` for Ketu.
pub fn karaka_merit(planet: Planet, longitude: f64) -> Option<f64> {
    match planet {
        Planet::Ketu => None,
        Planet::Rahu => Some(30.0 - degrees_in_sign(longitude)),
        _ => Some(degrees_in_sign(longitude)),
    }
}

/// Sort eligible bodies by descending merit, breaking exact ties by the
/// fixed planet priority. Ketu and repeated planets are dropped.
pub fn rank_merits(longitudes: &[(Planet, f64)]) -> Vec<(Planet, f64)> {
    let mut ranked: Vec<(Planet, f64)> = Vec::with_capacity(longitudes.len());
    for (planet, lon) in longitudes {
        if ranked.iter().any(|(seen, _)| seen == planet) {
            continue;
        }
        if let Some(merit) = karaka_merit(*planet, *lon) {
            ranked.push((*planet, merit));
        }
    }
    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| a.0.priority().cmp(&b.0.priority()))
    });
    ranked
}

/// Hand out `labels` in order to an already ranked list.
pub fn assign_labels(ranked: &[(Planet, f64)], labels: &[KarakaLabel]) -> KarakaAssignment {
    let slots = labels
        .iter()
        .zip(ranked.iter())
        .map(|(label, (planet, merit))| KarakaSlot {
            label: *label,
            planet: *planet,
            merit: *merit,
        })
        .collect();
    KarakaAssignment { slots }
}

/// Compute the 7- and 8-karaka schemes from a single ranking pass.
pub fn rank_chara_karakas(longitudes: &SiderealLongitudes) -> CharaKarakas {
    let pairs: Vec<(Planet, f64)> = COMPUTED_PLANETS
        .iter()
        .map(|p| (*p, longitudes.get(*p)))
        .collect();
    let ranked = rank_merits(&pairs);

    let without_rahu: Vec<(Planet, f64)> = ranked
        .iter()
        .copied()
        .filter(|(planet, _)| *planet != Planet::Rahu)
        .collect();

    CharaKarakas {
        seven: assign_labels(&without_rahu, &SEVEN_KARAKA_LABELS),
        eight: assign_labels(&ranked, &EIGHT_KARAKA_LABELS),
    }
}
