//! Vedic planet identifiers, sidereal longitude sets and sign names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::angle::normalize_degrees;

/// The nine grahas. Declaration order is the traditional weekday order and
/// doubles as the fixed tie-break priority for Chara Karaka ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

/// Bodies queried from the ephemeris: the seven classical planets plus Rahu.
pub const COMPUTED_PLANETS: [Planet; 8] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
    Planet::Rahu,
];

/// Every body that receives a house, Ketu included.
pub const ALL_PLANETS: [Planet; 9] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
    Planet::Rahu,
    Planet::Ketu,
];

// (name, abbreviation) accepted when parsing, e.g. "sun" / "su"
const PLANET_ALIASES: &[(&str, &str, Planet)] = &[
    ("sun", "su", Planet::Sun),
    ("moon", "mo", Planet::Moon),
    ("mars", "ma", Planet::Mars),
    ("mercury", "me", Planet::Mercury),
    ("jupiter", "ju", Planet::Jupiter),
    ("venus", "ve", Planet::Venus),
    ("saturn", "sa", Planet::Saturn),
    ("rahu", "ra", Planet::Rahu),
    ("ketu", "ke", Planet::Ketu),
];

impl Planet {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Position in the fixed priority list (0 = highest priority).
    pub const fn priority(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        PLANET_ALIASES
            .iter()
            .find(|(name, abbr, _)| *name == key || *abbr == key)
            .map(|(_, _, planet)| *planet)
            .ok_or_else(|| format!("unknown planet '{}'", s))
    }
}

/// Sidereal sign names, Aries = index 0.
pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

pub fn sign_name(sign_index: u8) -> &'static str {
    SIGN_NAMES[(sign_index % 12) as usize]
}

/// One sidereal longitude per computed body (Sun..Saturn, Rahu).
///
/// Ketu is not stored; [`SiderealLongitudes::get`] derives it from Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealLongitudes {
    values: [f64; 8],
}

impl SiderealLongitudes {
    /// Build from longitudes in `COMPUTED_PLANETS` order. Values are
    /// normalized to [0, 360).
    pub fn new(values: [f64; 8]) -> Self {
        Self {
            values: values.map(normalize_degrees),
        }
    }

    /// Build from `(planet, longitude)` pairs; every computed body must be
    /// present exactly once and Ketu must not be supplied.
    pub fn from_pairs(pairs: &[(Planet, f64)]) -> Result<Self, String> {
        let mut values = [f64::NAN; 8];
        for (planet, lon) in pairs {
            if *planet == Planet::Ketu {
                return Err("Ketu is derived from Rahu and cannot be supplied".to_string());
            }
            let slot = &mut values[planet.priority()];
            if !slot.is_nan() {
                return Err(format!("duplicate longitude for {}", planet));
            }
            if !lon.is_finite() {
                return Err(format!("non-finite longitude for {}", planet));
            }
            *slot = *lon;
        }
        if let Some(missing) = COMPUTED_PLANETS.iter().find(|p| values[p.priority()].is_nan()) {
            return Err(format!("missing longitude for {}", missing));
        }
        Ok(Self::new(values))
    }

    pub fn get(&self, planet: Planet) -> f64 {
        match planet {
            Planet::Ketu => normalize_degrees(self.values[Planet::Rahu.priority()] + 180.0),
            other => self.values[other.priority()],
        }
    }

    /// Iterate every body including the derived Ketu.
    pub fn iter(&self) -> impl Iterator<Item = (Planet, f64)> + '_ {
        ALL_PLANETS.iter().map(move |p| (*p, self.get(*p)))
    }
}
