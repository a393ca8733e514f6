use crate::ephemeris::GeoLocation;
use crate::place::database::PlaceDatabase;

/// Mean Earth radius (IUGG), km.
const EARTH_RADIUS_KM: f64 = 6371.0088;

pub const DEFAULT_ZONE_RADIUS_KM: f64 = 250.0;

/// Coordinate to IANA time-zone lookup.
pub trait ZoneFinder: Send + Sync {
    fn zone_for(&self, location: GeoLocation) -> Option<String>;
}

impl<F> ZoneFinder for F
where
    F: Fn(GeoLocation) -> Option<String> + Send + Sync,
{
    fn zone_for(&self, location: GeoLocation) -> Option<String> {
        self(location)
    }
}

/// Great-circle distance in km.
pub fn haversine_km(a: GeoLocation, b: GeoLocation) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Zone of the nearest gazetteer entry that carries a known zone id.
///
/// Returns `None` past `max_distance_km` so open ocean or sparse regions are
/// reported as unknown instead of borrowing a far-away zone.
pub struct NearestPlaceZones<'a> {
    database: &'a PlaceDatabase,
    max_distance_km: f64,
}

impl<'a> NearestPlaceZones<'a> {
    pub fn new(database: &'a PlaceDatabase) -> Self {
        Self {
            database,
            max_distance_km: DEFAULT_ZONE_RADIUS_KM,
        }
    }

    pub fn with_max_distance(mut self, km: f64) -> Self {
        self.max_distance_km = km;
        self
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }
}

impl<'a> ZoneFinder for NearestPlaceZones<'a> {
    fn zone_for(&self, location: GeoLocation) -> Option<String> {
        if !location.is_valid() {
            return None;
        }
        self.database
            .indexed()
            .filter_map(|(r, idx)| Some((haversine_km(location, r.location()), idx.zone?)))
            .filter(|(d, _)| *d <= self.max_distance_km)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, zone)| zone.name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::record::PlaceRecord;

    fn db() -> PlaceDatabase {
        PlaceDatabase::new(vec![
            PlaceRecord::new("Ljubljana", "SI", 46.05108, 14.50513, 284_355).with_timezone("Europe/Ljubljana"),
            PlaceRecord::new("Zagreb", "HR", 45.81444, 15.97798, 698_966).with_timezone("Europe/Zagreb"),
            PlaceRecord::new("Atlantis", "XX", 46.2, 14.9, 1).with_timezone("Mythic/Atlantis"),
        ])
    }

    #[test]
    fn test_haversine_known_distance() {
        let lj = GeoLocation::new(46.05108, 14.50513);
        let zg = GeoLocation::new(45.81444, 15.97798);
        let d = haversine_km(lj, zg);
        assert!((d - 117.0).abs() < 3.0, "got {}", d);
        assert_eq!(haversine_km(lj, lj), 0.0);
    }

    #[test]
    fn test_nearest_known_zone_wins() {
        let db = db();
        let zones = NearestPlaceZones::new(&db);
        // Kranj is closest to Ljubljana; the unparsable zone is ignored
        assert_eq!(
            zones.zone_for(GeoLocation::new(46.23887, 14.35561)).as_deref(),
            Some("Europe/Ljubljana")
        );
        assert_eq!(
            zones.zone_for(GeoLocation::new(45.9, 15.9)).as_deref(),
            Some("Europe/Zagreb")
        );
    }

    #[test]
    fn test_far_away_is_unknown() {
        let db = db();
        let zones = NearestPlaceZones::new(&db).with_max_distance(50.0);
        assert_eq!(zones.zone_for(GeoLocation::new(0.0, -30.0)), None);
        assert_eq!(zones.zone_for(GeoLocation::new(95.0, 0.0)), None);
    }

    #[test]
    fn test_closure_finder() {
        let finder = |_: GeoLocation| Some("UTC".to_string());
        assert_eq!(finder.zone_for(GeoLocation::new(0.0, 0.0)).as_deref(), Some("UTC"));
    }
}
