//! Chart computation with a primary/fallback cascade.
//!
//! The primary branch asks the text provider for descriptive labels and then
//! runs the numeric pipeline. Any failure there drops to the fallback branch,
//! which works from the ephemeris alone and generates its own labels. A
//! request ends with either a complete payload or a `ComputationFailed` that
//! carries both causes; nothing is retried.

use log::{debug, info, warn};
use thiserror::Error;

use crate::chart::payload::{Ascendant, ChartCore, ChartOutcome, ChartPayload, ChartRequest, ChartSource};
use crate::chart::text::{ChartTextProvider, ProviderError};
use crate::ephemeris::{EphemerisError, EphemerisProvider, GeoLocation, NodeConvention};
use crate::time::{julian_day_ut, DateTimeError, UTC_OFFSET_RANGE_HOURS};
use crate::vedic::houses::whole_sign_houses;
use crate::vedic::karakas::rank_chara_karakas;
use crate::vedic::nakshatra::MoonNakshatra;
use crate::vedic::normalize::{sidereal_longitudes, CHART_SIDEREAL_MODE};
use crate::vedic::types::Planet;

/// Failure of one cascade branch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid chart request: {0}")]
    InvalidInput(#[from] DateTimeError),
    #[error("Invalid chart request: {message}")]
    InvalidRequest { message: String },
    #[error("Chart computation failed (primary: {primary}; fallback: {fallback})")]
    ComputationFailed { primary: StageError, fallback: StageError },
}

/// Sidereal positions, karakas and houses for one instant and place.
pub fn compute_chart<P>(
    provider: &P,
    jd_ut: f64,
    latitude: f64,
    longitude: f64,
    node: NodeConvention,
) -> Result<ChartCore, EphemerisError>
where
    P: EphemerisProvider + ?Sized,
{
    let cusps = provider.ascendant_and_cusps(jd_ut, GeoLocation::new(latitude, longitude), CHART_SIDEREAL_MODE)?;
    chart_for_ascendant(provider, jd_ut, cusps.ascendant, node)
}

fn chart_for_ascendant<P>(
    provider: &P,
    jd_ut: f64,
    ascendant: f64,
    node: NodeConvention,
) -> Result<ChartCore, EphemerisError>
where
    P: EphemerisProvider + ?Sized,
{
    let longitudes = sidereal_longitudes(provider, jd_ut, node)?;
    let karakas = rank_chara_karakas(&longitudes);
    let houses = whole_sign_houses(&longitudes, ascendant);
    Ok(ChartCore {
        julian_day: jd_ut,
        longitudes,
        ascendant,
        karakas,
        houses,
    })
}

#[derive(Debug)]
enum CascadeState {
    TryPrimary,
    TryFallback { cause: StageError },
    Done(ChartOutcome),
    Failed { primary: StageError, fallback: StageError },
}

pub struct ChartOrchestrator<'a> {
    ephemeris: &'a dyn EphemerisProvider,
    text: Option<&'a dyn ChartTextProvider>,
    node: NodeConvention,
}

impl<'a> ChartOrchestrator<'a> {
    pub fn new(ephemeris: &'a dyn EphemerisProvider) -> Self {
        Self {
            ephemeris,
            text: None,
            node: NodeConvention::default(),
        }
    }

    pub fn with_text_provider(mut self, provider: &'a dyn ChartTextProvider) -> Self {
        self.text = Some(provider);
        self
    }

    pub fn with_node(mut self, node: NodeConvention) -> Self {
        self.node = node;
        self
    }

    pub fn node(&self) -> NodeConvention {
        self.node
    }

    pub fn run_cascade(&self, request: &ChartRequest) -> Result<ChartOutcome, ChartError> {
        let jd = self.validate(request)?;
        let mut state = CascadeState::TryPrimary;
        loop {
            state = match state {
                CascadeState::TryPrimary => match self.primary(request, jd) {
                    Ok(payload) => CascadeState::Done(ChartOutcome {
                        source: ChartSource::Primary,
                        payload,
                        primary_failure: None,
                    }),
                    Err(cause) => {
                        warn!("Primary chart path failed for '{}': {}", request.name, cause);
                        CascadeState::TryFallback { cause }
                    }
                },
                CascadeState::TryFallback { cause } => match self.fallback(request, jd) {
                    Ok(payload) => CascadeState::Done(ChartOutcome {
                        source: ChartSource::Fallback,
                        payload,
                        primary_failure: Some(cause.to_string()),
                    }),
                    Err(fallback) => CascadeState::Failed {
                        primary: cause,
                        fallback,
                    },
                },
                CascadeState::Done(outcome) => {
                    info!("Chart for '{}' computed ({:?})", request.name, outcome.source);
                    return Ok(outcome);
                }
                CascadeState::Failed { primary, fallback } => {
                    warn!("Fallback chart path failed for '{}': {}", request.name, fallback);
                    return Err(ChartError::ComputationFailed { primary, fallback });
                }
            };
        }
    }

    /// Input errors are the caller's to fix and skip the cascade entirely.
    fn validate(&self, request: &ChartRequest) -> Result<f64, ChartError> {
        if !GeoLocation::new(request.latitude, request.longitude).is_valid() {
            return Err(ChartError::InvalidRequest {
                message: format!(
                    "coordinates out of range: {}, {}",
                    request.latitude, request.longitude
                ),
            });
        }
        if !UTC_OFFSET_RANGE_HOURS.contains(&request.offset_hours) {
            return Err(ChartError::InvalidRequest {
                message: format!("UTC offset out of range: {}", request.offset_hours),
            });
        }
        let jd = julian_day_ut(&request.date, &request.time, request.offset_hours)?;
        debug!("'{}' at {} {} (UTC{:+}) -> JD {:.6}", request.name, request.date, request.time, request.offset_hours, jd);
        Ok(jd)
    }

    fn primary(&self, request: &ChartRequest, jd: f64) -> Result<ChartPayload, StageError> {
        let provider = self.text.ok_or(ProviderError::Unavailable)?;
        let text = provider.describe(request)?;
        let core = compute_chart(self.ephemeris, jd, request.latitude, request.longitude, self.node)?;

        let ascendant = Ascendant::from_longitude(core.ascendant).with_text(text.ascendant);
        let mut moon = MoonNakshatra::from_longitude(core.longitudes.get(Planet::Moon));
        moon.text = text.moon_nakshatra;
        Ok(ChartPayload::assemble(request, self.node, core, ascendant, moon))
    }

    fn fallback(&self, request: &ChartRequest, jd: f64) -> Result<ChartPayload, StageError> {
        let location = GeoLocation::new(request.latitude, request.longitude);
        let cusps = self
            .ephemeris
            .ascendant_and_cusps(jd, location, CHART_SIDEREAL_MODE)?;
        let moon = self
            .ephemeris
            .longitude(jd, Planet::Moon, CHART_SIDEREAL_MODE, self.node)?;
        let nakshatra = MoonNakshatra::from_longitude(moon);
        let core = chart_for_ascendant(self.ephemeris, jd, cusps.ascendant, self.node)?;

        let ascendant = Ascendant::from_longitude(core.ascendant);
        Ok(ChartPayload::assemble(request, self.node, core, ascendant, nakshatra))
    }
}
