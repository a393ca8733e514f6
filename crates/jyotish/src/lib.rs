//! Sidereal (Lahiri) natal chart engine: Chara Karakas, whole-sign houses,
//! place resolution and local-time offsets.

pub mod angle;
pub mod chart;
pub mod ephemeris;
pub mod place;
pub mod time;
pub mod vedic;

pub use chart::{compute_chart, ChartError, ChartOrchestrator, ChartOutcome, ChartPayload, ChartRequest, ChartSource};
pub use ephemeris::{EphemerisError, EphemerisProvider, FixedEphemeris, GeoLocation, NodeConvention, SwissEphemerisAdapter};
pub use place::{PlaceDatabase, PlaceResolution, PlaceResolver, ResolvedLocation};
pub use time::{julian_day_ut, local_offset, DateTimeError};
pub use vedic::{rank_chara_karakas, whole_sign_houses, CharaKarakas, HousePlacements, KarakaLabel, Planet};
