//! Descriptive chart text (ascendant and Moon nakshatra labels).
//!
//! Text is decoration on top of the numeric chart. A provider may be slow,
//! remote or missing entirely; the orchestrator treats any failure here as a
//! reason to fall back, never as a reason to fail the chart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::angle::{format_dms_in_sign, sign_index};
use crate::chart::payload::ChartRequest;
use crate::ephemeris::{EphemerisError, EphemerisProvider, GeoLocation};
use crate::time::{julian_day_ut, DateTimeError};
use crate::vedic::nakshatra::get_nakshatra_for_longitude;
use crate::vedic::normalize::CHART_SIDEREAL_MODE;
use crate::vedic::types::{sign_name, Planet};

/// Sanskrit rashi names, Mesha (Aries) = index 0.
const RASHI_NAMES: [&str; 12] = [
    "Mesha",
    "Vrishabha",
    "Mithuna",
    "Karka",
    "Simha",
    "Kanya",
    "Tula",
    "Vrishchika",
    "Dhanu",
    "Makara",
    "Kumbha",
    "Meena",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartText {
    pub ascendant: String,
    pub moon_nakshatra: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Chart text provider is not configured")]
    Unavailable,
    #[error("Chart text provider rejected the request: {0}")]
    InvalidRequest(#[from] DateTimeError),
    #[error("Chart text provider failed: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error("Chart text provider failed: {message}")]
    Failed { message: String },
}

pub trait ChartTextProvider: Send + Sync {
    fn describe(&self, request: &ChartRequest) -> Result<ChartText, ProviderError>;
}

impl<F> ChartTextProvider for F
where
    F: Fn(&ChartRequest) -> Result<ChartText, ProviderError> + Send + Sync,
{
    fn describe(&self, request: &ChartRequest) -> Result<ChartText, ProviderError> {
        self(request)
    }
}

/// Builds labels like `Simha (Leo) 12°34'` and
/// `Swati, pada 3, ruled by Rahu` from an ephemeris.
pub struct EphemerisChartText<P> {
    ephemeris: P,
}

impl<P: EphemerisProvider> EphemerisChartText<P> {
    pub fn new(ephemeris: P) -> Self {
        Self { ephemeris }
    }
}

impl<P: EphemerisProvider> ChartTextProvider for EphemerisChartText<P> {
    fn describe(&self, request: &ChartRequest) -> Result<ChartText, ProviderError> {
        let jd = julian_day_ut(&request.date, &request.time, request.offset_hours)?;
        let location = GeoLocation::new(request.latitude, request.longitude);

        let cusps = self
            .ephemeris
            .ascendant_and_cusps(jd, location, CHART_SIDEREAL_MODE)?;
        let moon = self
            .ephemeris
            .longitude(jd, Planet::Moon, CHART_SIDEREAL_MODE, Default::default())?;

        let sign = sign_index(cusps.ascendant);
        let nakshatra = get_nakshatra_for_longitude(moon);
        Ok(ChartText {
            ascendant: format!(
                "{} ({}) {}",
                RASHI_NAMES[sign as usize],
                sign_name(sign),
                format_dms_in_sign(cusps.ascendant)
            ),
            moon_nakshatra: format!(
                "{}, pada {}, ruled by {}",
                nakshatra.base.name, nakshatra.pada, nakshatra.base.lord
            ),
        })
    }
}
