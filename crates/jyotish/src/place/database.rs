//! Read-only gazetteer.
//!
//! Two on-disk layouts are understood: a headed CSV
//! (`name,country_code,latitude,longitude,population[,timezone]`) and the
//! tab-separated GeoNames city dumps (`cities500.txt`, `cities15000.txt`, ...).
//! A small sample gazetteer is compiled in for tests and offline use.

use chrono_tz::Tz;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

use crate::place::record::PlaceRecord;

const BUNDLED_PLACES_CSV: &str = include_str!("../../data/places.csv");

// GeoNames "geoname" table columns
const GN_NAME: usize = 1;
const GN_LATITUDE: usize = 4;
const GN_LONGITUDE: usize = 5;
const GN_COUNTRY: usize = 8;
const GN_POPULATION: usize = 14;
const GN_TIMEZONE: usize = 17;

#[derive(Error, Debug)]
pub enum PlaceLoadError {
    #[error("Failed to open place database {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed place database: {0}")]
    Csv(#[from] csv::Error),
    #[error("Malformed place record on line {line}: {message}")]
    InvalidRecord { line: u64, message: String },
}

/// On-disk layout of a gazetteer file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceFormat {
    #[default]
    Csv,
    Geonames,
}

impl FromStr for PlaceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "geonames" => Ok(Self::Geonames),
            other => Err(format!("unknown place database format '{}' (expected 'csv' or 'geonames')", other)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    country_code: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default)]
    timezone: Option<String>,
}

/// Lookup fields derived once per record when the database is built.
#[derive(Debug, Clone)]
pub(crate) struct PlaceIndex {
    /// Normalized bare name
    pub(crate) name: String,
    /// Zone id that chrono-tz understands
    pub(crate) zone: Option<Tz>,
}

impl PlaceIndex {
    fn for_record(record: &PlaceRecord) -> Self {
        let zone = record.timezone.as_deref().and_then(|id| match id.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                debug!("Ignoring unknown zone '{}' on {}", id, record.display_name());
                None
            }
        });
        Self {
            name: record.normalized_name(),
            zone,
        }
    }
}

/// Immutable collection of place records, shared read-only by resolvers.
#[derive(Debug, Clone, Default)]
pub struct PlaceDatabase {
    records: Vec<PlaceRecord>,
    index: Vec<PlaceIndex>,
}

static BUNDLED: OnceLock<PlaceDatabase> = OnceLock::new();
static LOADED: OnceLock<PlaceDatabase> = OnceLock::new();

impl PlaceDatabase {
    /// Build from records, dropping any with unusable coordinates or names.
    pub fn new(records: Vec<PlaceRecord>) -> Self {
        let total = records.len();
        let records: Vec<PlaceRecord> = records
            .into_iter()
            .filter(|r| {
                let ok = !r.name.is_empty() && !r.country_code.is_empty() && r.location().is_valid();
                if !ok {
                    warn!("Skipping place record with invalid data: {:?}", r);
                }
                ok
            })
            .collect();
        if records.len() != total {
            warn!("Dropped {} of {} place records", total - records.len(), total);
        }
        let index = records.iter().map(PlaceIndex::for_record).collect();
        Self { records, index }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PlaceLoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut records = Vec::new();
        for row in rdr.deserialize::<CsvRow>() {
            let row = row?;
            let mut record = PlaceRecord::new(
                &row.name,
                &row.country_code,
                row.latitude,
                row.longitude,
                row.population.unwrap_or(0),
            );
            if let Some(zone) = row.timezone.as_deref() {
                record = record.with_timezone(zone);
            }
            records.push(record);
        }
        Ok(Self::new(records))
    }

    pub fn from_geonames_reader<R: Read>(reader: R) -> Result<Self, PlaceLoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);
        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let field = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");
            let parse_coord = |idx: usize, what: &str| {
                field(idx).parse::<f64>().map_err(|_| PlaceLoadError::InvalidRecord {
                    line,
                    message: format!("bad {} '{}'", what, field(idx)),
                })
            };
            let latitude = parse_coord(GN_LATITUDE, "latitude")?;
            let longitude = parse_coord(GN_LONGITUDE, "longitude")?;
            let population = field(GN_POPULATION).parse::<u64>().unwrap_or(0);
            records.push(
                PlaceRecord::new(field(GN_NAME), field(GN_COUNTRY), latitude, longitude, population)
                    .with_timezone(field(GN_TIMEZONE)),
            );
        }
        Ok(Self::new(records))
    }

    /// Load a gazetteer file from disk.
    pub fn load(path: &Path, format: PlaceFormat) -> Result<Self, PlaceLoadError> {
        let file = File::open(path).map_err(|source| PlaceLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let db = match format {
            PlaceFormat::Csv => Self::from_csv_reader(file)?,
            PlaceFormat::Geonames => Self::from_geonames_reader(file)?,
        };
        info!("Loaded {} places from {}", db.len(), path.display());
        Ok(db)
    }

    /// Load once per process and hand out the shared copy afterwards.
    ///
    /// Later calls return the first database loaded, whatever path they pass.
    pub fn load_shared(path: &Path, format: PlaceFormat) -> Result<&'static PlaceDatabase, PlaceLoadError> {
        if let Some(db) = LOADED.get() {
            return Ok(db);
        }
        let db = Self::load(path, format)?;
        Ok(LOADED.get_or_init(|| db))
    }

    /// The compiled-in sample gazetteer, parsed on first use.
    pub fn bundled() -> &'static PlaceDatabase {
        BUNDLED.get_or_init(|| match Self::from_csv_reader(BUNDLED_PLACES_CSV.as_bytes()) {
            Ok(db) => db,
            Err(e) => {
                warn!("Bundled place list failed to parse: {}", e);
                PlaceDatabase::default()
            }
        })
    }

    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    pub(crate) fn indexed(&self) -> impl Iterator<Item = (&PlaceRecord, &PlaceIndex)> {
        self.records.iter().zip(self.index.iter())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
