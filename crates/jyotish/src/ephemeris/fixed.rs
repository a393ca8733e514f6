//! Table-driven ephemeris for tests and for replaying stored charts.
//!
//! Longitudes are taken as already sidereal (Lahiri), so the mode argument
//! only has to match the one frame the crate supports.

use std::collections::HashMap;

use crate::angle::{normalize_degrees, sign_index};
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, HouseCusps, NodeConvention, SiderealMode};
use crate::vedic::types::Planet;

#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    longitudes: HashMap<Planet, f64>,
    mean_rahu: Option<f64>,
    ascendant: Option<f64>,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a body's sidereal longitude. Rahu set here serves both node
    /// conventions unless [`with_mean_rahu`](Self::with_mean_rahu) overrides it.
    pub fn with(mut self, body: Planet, longitude: f64) -> Self {
        self.longitudes.insert(body, normalize_degrees(longitude));
        self
    }

    pub fn with_mean_rahu(mut self, longitude: f64) -> Self {
        self.mean_rahu = Some(normalize_degrees(longitude));
        self
    }

    pub fn with_ascendant(mut self, longitude: f64) -> Self {
        self.ascendant = Some(normalize_degrees(longitude));
        self
    }

    /// Build from `(planet, longitude)` pairs.
    pub fn from_longitudes(pairs: &[(Planet, f64)]) -> Self {
        pairs
            .iter()
            .fold(Self::new(), |eph, (planet, lon)| eph.with(*planet, *lon))
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn longitude(
        &self,
        jd_ut: f64,
        body: Planet,
        _mode: SiderealMode,
        node: NodeConvention,
    ) -> Result<f64, EphemerisError> {
        if !jd_ut.is_finite() {
            return Err(EphemerisError::InvalidJulianDay { jd: jd_ut });
        }
        if body == Planet::Ketu {
            return Err(EphemerisError::UnsupportedBody { body });
        }
        if body == Planet::Rahu && node == NodeConvention::Mean {
            if let Some(lon) = self.mean_rahu {
                return Ok(lon);
            }
        }
        self.longitudes
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: "no fixture longitude".to_string(),
            })
    }

    fn ascendant_and_cusps(
        &self,
        jd_ut: f64,
        _location: GeoLocation,
        _mode: SiderealMode,
    ) -> Result<HouseCusps, EphemerisError> {
        if !jd_ut.is_finite() {
            return Err(EphemerisError::InvalidJulianDay { jd: jd_ut });
        }
        let ascendant = self.ascendant.ok_or_else(|| EphemerisError::HouseCalculationFailed {
            message: "no fixture ascendant".to_string(),
        })?;

        // Whole-sign cusps start at the ascendant's sign
        let first = sign_index(ascendant) as f64 * 30.0;
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = normalize_degrees(first + 30.0 * i as f64);
        }

        Ok(HouseCusps {
            ascendant,
            mc: normalize_degrees(ascendant + 270.0),
            cusps,
        })
    }
}
