use serde::{Deserialize, Serialize};

use crate::ephemeris::GeoLocation;

/// One gazetteer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    /// ISO 3166-1 alpha-2, uppercase
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Only used to order ambiguous candidates
    pub population: u64,
    /// IANA zone id when the source carries one (GeoNames does)
    pub timezone: Option<String>,
}

impl PlaceRecord {
    pub fn new(name: &str, country_code: &str, latitude: f64, longitude: f64, population: u64) -> Self {
        Self {
            name: name.split_whitespace().collect::<Vec<_>>().join(" "),
            country_code: country_code.trim().to_uppercase(),
            latitude,
            longitude,
            population,
            timezone: None,
        }
    }

    pub fn with_timezone(mut self, zone: &str) -> Self {
        let zone = zone.trim();
        self.timezone = if zone.is_empty() { None } else { Some(zone.to_string()) };
        self
    }

    /// "City, CC"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country_code)
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.latitude, self.longitude)
    }

    /// Normalized bare name, e.g. "novo mesto".
    pub fn normalized_name(&self) -> String {
        normalize_text(&self.name)
    }
}

/// Lowercase and collapse runs of whitespace.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
