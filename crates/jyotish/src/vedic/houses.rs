//! Whole-sign houses: the ascendant's sign is house 1, the next sign house 2, and so on.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::angle::sign_index;
use crate::vedic::types::{Planet, SiderealLongitudes, ALL_PLANETS};

/// House 1..=12 of a longitude relative to the ascendant.
pub fn house_of(longitude: f64, ascendant: f64) -> u8 {
    let diff = sign_index(longitude) as i32 - sign_index(ascendant) as i32;
    (diff.rem_euclid(12) + 1) as u8
}

/// Planet -> house for Sun..Saturn, Rahu and Ketu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HousePlacements {
    pub ascendant_sign: u8,
    pub placements: BTreeMap<Planet, u8>,
}

impl HousePlacements {
    pub fn house(&self, planet: Planet) -> Option<u8> {
        self.placements.get(&planet).copied()
    }

    /// House number -> occupants, for all twelve houses. Occupants are sorted
    /// by planet name.
    pub fn occupants(&self) -> BTreeMap<u8, Vec<Planet>> {
        let mut by_house: BTreeMap<u8, Vec<Planet>> = (1..=12).map(|h| (h, Vec::new())).collect();
        for (planet, house) in &self.placements {
            by_house.entry(*house).or_default().push(*planet);
        }
        for planets in by_house.values_mut() {
            planets.sort_by_key(|p| p.name());
        }
        by_house
    }
}

/// Assign whole-sign houses from the same sidereal longitudes used for karakas.
pub fn whole_sign_houses(longitudes: &SiderealLongitudes, ascendant: f64) -> HousePlacements {
    let placements = ALL_PLANETS
        .iter()
        .map(|p| (*p, house_of(longitudes.get(*p), ascendant)))
        .collect();
    HousePlacements {
        ascendant_sign: sign_index(ascendant),
        placements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_of() {
        assert_eq!(house_of(15.0, 5.0), 1);
        assert_eq!(house_of(35.0, 5.0), 2);
        assert_eq!(house_of(5.0, 35.0), 12);
        assert_eq!(house_of(200.0, 100.0), 4);
    }

    #[test]
    fn test_occupants_cover_all_houses() {
        let lons = SiderealLongitudes::new([15.0, 200.0, 95.0, 10.0, 340.0, 75.0, 260.0, 100.0]);
        let houses = whole_sign_houses(&lons, 0.0);
        let occupants = houses.occupants();
        assert_eq!(occupants.len(), 12);
        assert_eq!(occupants[&1], vec![Planet::Mercury, Planet::Sun]);
        assert_eq!(occupants[&4], vec![Planet::Mars, Planet::Rahu]);
        assert_eq!(occupants[&10], vec![Planet::Ketu]);
        assert!(occupants[&2].is_empty());
    }
}
