use crate::angle::normalize_degrees;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, HouseCusps, NodeConvention, SiderealMode};
use crate::vedic::types::Planet;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, set_ephe_path};

// Swiss Ephemeris body codes
const SE_SUN: i32 = 0;
const SE_MOON: i32 = 1;
const SE_MERCURY: i32 = 2;
const SE_VENUS: i32 = 3;
const SE_MARS: i32 = 4;
const SE_JUPITER: i32 = 5;
const SE_SATURN: i32 = 6;
const SE_MEAN_NODE: i32 = 10;
const SE_TRUE_NODE: i32 = 11;

// FLG_SWIEPH: use Swiss Ephemeris files. Positions come back tropical; the
// sidereal shift is applied per call from the requested mode.
const FLG_SWIEPH: i32 = 2;

// Whole-sign house system code for swe_houses_ex
const HSYS_WHOLE_SIGN: i32 = b'W' as i32;

// Range covered by the standard sepl/semo file set (5400 BCE .. 5400 CE)
const MIN_JD: f64 = -251_291.5;
const MAX_JD: f64 = 3_693_368.5;

pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then to the conventional install
    /// location.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        // swe_set_ephe_path takes a C string and the setting is process-wide
        let path_str = path
            .to_str()
            .filter(|p| !p.contains('\0'))
            .ok_or_else(|| EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path must be valid UTF-8 without NUL bytes".to_string(),
            })?;
        set_ephe_path(path_str);

        debug!("Swiss Ephemeris data directory: {}", path.display());
        Ok(Self { ephemeris_path: path })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    /// Tropical longitude straight from the Swiss Ephemeris.
    fn tropical_longitude(&self, jd_ut: f64, body: Planet, node: NodeConvention) -> Result<f64, EphemerisError> {
        let code = body_code(body, node)?;
        let result = calc_ut(jd_ut, code as u32, FLG_SWIEPH as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: "non-finite longitude".to_string(),
            });
        }
        Ok(normalize_degrees(longitude))
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn longitude(
        &self,
        jd_ut: f64,
        body: Planet,
        mode: SiderealMode,
        node: NodeConvention,
    ) -> Result<f64, EphemerisError> {
        validate_julian_day(jd_ut)?;
        let tropical = self.tropical_longitude(jd_ut, body, node)?;
        Ok(mode.to_sidereal(tropical, jd_ut))
    }

    fn ascendant_and_cusps(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        mode: SiderealMode,
    ) -> Result<HouseCusps, EphemerisError> {
        validate_julian_day(jd_ut)?;
        if !location.is_valid() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("coordinates out of range: {}, {}", location.lat, location.lon),
            });
        }

        use swisseph::swe::houses_ex;
        use swisseph::{AscMc, Cusp};
        let (c, a) = houses_ex(jd_ut, 0, location.lat, location.lon, HSYS_WHOLE_SIGN);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let tropical = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if !ascmc.ascendant.is_finite() || tropical.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite cusp data at latitude {}", location.lat),
            });
        }

        let mut sidereal = [0.0; 12];
        for (slot, cusp) in sidereal.iter_mut().zip(tropical.iter()) {
            *slot = mode.to_sidereal(*cusp, jd_ut);
        }

        Ok(HouseCusps {
            ascendant: mode.to_sidereal(ascmc.ascendant, jd_ut),
            mc: mode.to_sidereal(ascmc.mc, jd_ut),
            cusps: sidereal,
        })
    }
}

fn body_code(body: Planet, node: NodeConvention) -> Result<i32, EphemerisError> {
    match body {
        Planet::Sun => Ok(SE_SUN),
        Planet::Moon => Ok(SE_MOON),
        Planet::Mercury => Ok(SE_MERCURY),
        Planet::Venus => Ok(SE_VENUS),
        Planet::Mars => Ok(SE_MARS),
        Planet::Jupiter => Ok(SE_JUPITER),
        Planet::Saturn => Ok(SE_SATURN),
        Planet::Rahu => Ok(match node {
            NodeConvention::Mean => SE_MEAN_NODE,
            NodeConvention::True => SE_TRUE_NODE,
        }),
        Planet::Ketu => Err(EphemerisError::UnsupportedBody { body }),
    }
}

pub(crate) fn validate_julian_day(jd_ut: f64) -> Result<(), EphemerisError> {
    if jd_ut.is_finite() && (MIN_JD..=MAX_JD).contains(&jd_ut) {
        Ok(())
    } else {
        Err(EphemerisError::InvalidJulianDay { jd: jd_ut })
    }
}
