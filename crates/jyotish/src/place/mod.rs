//! Place-name resolution against a read-only gazetteer.

pub mod countries;
pub mod database;
pub mod record;
pub mod resolver;
pub mod zones;

pub use countries::CountryTable;
pub use database::{PlaceDatabase, PlaceFormat, PlaceLoadError};
pub use record::PlaceRecord;
pub use resolver::{PlaceResolution, PlaceResolver, ResolvedLocation, MAX_CANDIDATES};
pub use zones::{haversine_km, NearestPlaceZones, ZoneFinder, DEFAULT_ZONE_RADIUS_KM};
