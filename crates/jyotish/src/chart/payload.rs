use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::angle::{degrees_in_sign, format_dms_in_sign, sign_index};
use crate::ephemeris::NodeConvention;
use crate::vedic::houses::HousePlacements;
use crate::vedic::karakas::CharaKarakas;
use crate::vedic::nakshatra::MoonNakshatra;
use crate::vedic::types::{sign_name, Planet, SiderealLongitudes};

/// Everything a chart needs from the caller once the place is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub name: String,
    /// YYYY-MM-DD, local civil date
    pub date: String,
    /// HH:MM or HH:MM:SS, local civil time
    pub time: String,
    /// Display name of the resolved place
    pub place: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Local offset from UTC in effect at date/time, hours
    pub offset_hours: f64,
}

/// Numeric core shared by both cascade branches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartCore {
    pub julian_day: f64,
    pub longitudes: SiderealLongitudes,
    pub ascendant: f64,
    pub karakas: CharaKarakas,
    pub houses: HousePlacements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSource {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ascendant {
    pub longitude: f64,
    pub sign: &'static str,
    pub degrees_in_sign: f64,
    pub text: String,
}

impl Ascendant {
    /// Ascendant with a plain `Leo 12°34'` label.
    pub fn from_longitude(longitude: f64) -> Self {
        let sign = sign_name(sign_index(longitude));
        Self {
            longitude,
            sign,
            degrees_in_sign: degrees_in_sign(longitude),
            text: format!("{} {}", sign, format_dms_in_sign(longitude)),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Chart response; the shape is the same whichever branch produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub name: String,
    pub place: String,
    pub julian_day: f64,
    pub node: NodeConvention,
    pub ascendant: Ascendant,
    pub moon_nakshatra: MoonNakshatra,
    pub longitudes: BTreeMap<Planet, f64>,
    pub karakas: CharaKarakas,
    pub houses: BTreeMap<Planet, u8>,
    pub occupants: BTreeMap<u8, Vec<Planet>>,
}

impl ChartPayload {
    pub fn assemble(
        request: &ChartRequest,
        node: NodeConvention,
        core: ChartCore,
        ascendant: Ascendant,
        moon_nakshatra: MoonNakshatra,
    ) -> Self {
        let occupants = core.houses.occupants();
        Self {
            name: request.name.clone(),
            place: request.place.clone(),
            julian_day: core.julian_day,
            node,
            ascendant,
            moon_nakshatra,
            longitudes: core.longitudes.iter().collect(),
            karakas: core.karakas,
            houses: core.houses.placements,
            occupants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOutcome {
    pub source: ChartSource,
    pub payload: ChartPayload,
    /// Why the primary branch was abandoned, when it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_failure: Option<String>,
}
