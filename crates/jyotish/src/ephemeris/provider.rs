use crate::ephemeris::types::{GeoLocation, HouseCusps, NodeConvention, SiderealMode};
use crate::vedic::types::Planet;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid Julian day: {jd}")]
    InvalidJulianDay { jd: f64 },
    #[error("{body} is not provided by the ephemeris (it is derived from another body)")]
    UnsupportedBody { body: Planet },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: Planet,
        jd: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Source of raw planetary positions and house cusps.
///
/// The sidereal frame and node convention are explicit arguments on every
/// call; implementations must not keep a mutable "current mode".
pub trait EphemerisProvider: Send + Sync {
    /// Sidereal ecliptic longitude of `body` in degrees [0, 360).
    ///
    /// Supports Sun through Saturn and Rahu (under either node convention).
    /// Ketu is derived by callers and yields `UnsupportedBody`.
    fn longitude(
        &self,
        jd_ut: f64,
        body: Planet,
        mode: SiderealMode,
        node: NodeConvention,
    ) -> Result<f64, EphemerisError>;

    /// Sidereal ascendant and whole-sign house cusps for a place.
    fn ascendant_and_cusps(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        mode: SiderealMode,
    ) -> Result<HouseCusps, EphemerisError>;
}

impl<T: EphemerisProvider + ?Sized> EphemerisProvider for &T {
    fn longitude(
        &self,
        jd_ut: f64,
        body: Planet,
        mode: SiderealMode,
        node: NodeConvention,
    ) -> Result<f64, EphemerisError> {
        (**self).longitude(jd_ut, body, mode, node)
    }

    fn ascendant_and_cusps(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        mode: SiderealMode,
    ) -> Result<HouseCusps, EphemerisError> {
        (**self).ascendant_and_cusps(jd_ut, location, mode)
    }
}

impl<T: EphemerisProvider + ?Sized> EphemerisProvider for Box<T> {
    fn longitude(
        &self,
        jd_ut: f64,
        body: Planet,
        mode: SiderealMode,
        node: NodeConvention,
    ) -> Result<f64, EphemerisError> {
        (**self).longitude(jd_ut, body, mode, node)
    }

    fn ascendant_and_cusps(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        mode: SiderealMode,
    ) -> Result<HouseCusps, EphemerisError> {
        (**self).ascendant_and_cusps(jd_ut, location, mode)
    }
}
