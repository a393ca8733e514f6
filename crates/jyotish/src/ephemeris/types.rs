use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180], both finite.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Sidereal reference frame passed explicitly on every ephemeris call.
///
/// Only Lahiri (Chitrapaksha) is offered: the chart pipeline pins it and
/// nothing above the provider may choose another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiderealMode {
    #[default]
    Lahiri,
}

/// Lunar node convention used for Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeConvention {
    Mean,
    #[default]
    True,
}

impl FromStr for NodeConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "true" => Ok(Self::True),
            other => Err(format!("unknown node convention '{}' (expected 'mean' or 'true')", other)),
        }
    }
}

impl fmt::Display for NodeConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "mean"),
            Self::True => write!(f, "true"),
        }
    }
}

/// Ascendant, MC and the twelve whole-sign cusps for one instant and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    /// Ascendant longitude in degrees [0, 360)
    pub ascendant: f64,
    /// Midheaven longitude in degrees [0, 360)
    pub mc: f64,
    /// Cusps of houses 1..=12
    pub cusps: [f64; 12],
}
