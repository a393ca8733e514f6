use anyhow::Context;
use jyotish::ephemeris::NodeConvention;
use jyotish::place::{PlaceFormat, DEFAULT_ZONE_RADIUS_KM};
use log::info;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried for `configs/jyotish.toml`, from the workspace
/// root and from a crate directory.
const CONFIG_PATHS: [&str; 2] = ["configs/jyotish.toml", "../../configs/jyotish.toml"];

const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSettings {
    /// Swiss Ephemeris data directory; `None` leaves the adapter default
    pub path: Option<PathBuf>,
    pub node: NodeConvention,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSettings {
    /// Gazetteer file; `None` uses the bundled sample list
    pub database: Option<PathBuf>,
    pub format: PlaceFormat,
    pub zone_radius_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    /// Reject place text without a ", Country" qualifier
    pub require_country: bool,
    /// Ask the text provider for descriptive labels before falling back
    pub text_provider: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JyotishSettings {
    pub ephemeris: EphemerisSettings,
    pub places: PlaceSettings,
    pub chart: ChartSettings,
}

impl Default for JyotishSettings {
    fn default() -> Self {
        // Same values an empty file produces
        RootConfigToml::default().into_settings()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    node: NodeConvention,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlacesToml {
    #[serde(default)]
    database: Option<PathBuf>,
    #[serde(default)]
    format: PlaceFormat,
    #[serde(default = "default_zone_radius_km")]
    zone_radius_km: f64,
}

impl Default for PlacesToml {
    fn default() -> Self {
        Self {
            database: None,
            format: PlaceFormat::default(),
            zone_radius_km: default_zone_radius_km(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartToml {
    #[serde(default)]
    require_country: bool,
    #[serde(default = "default_true")]
    text_provider: bool,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            require_country: false,
            text_provider: default_true(),
        }
    }
}

fn default_zone_radius_km() -> f64 {
    DEFAULT_ZONE_RADIUS_KM
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    places: PlacesToml,
    #[serde(default)]
    chart: ChartToml,
}

impl RootConfigToml {
    fn into_settings(self) -> JyotishSettings {
        JyotishSettings {
            ephemeris: EphemerisSettings {
                path: self.ephemeris.path,
                node: self.ephemeris.node,
            },
            places: PlaceSettings {
                database: self.places.database,
                format: self.places.format,
                zone_radius_km: self.places.zone_radius_km,
            },
            chart: ChartSettings {
                require_country: self.chart.require_country,
                text_provider: self.chart.text_provider,
            },
        }
    }
}

/// Try common relative paths for `configs/jyotish.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            info!("Loaded config from {}", p);
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load jyotish.toml from {:?}", CONFIG_PATHS);
}

pub fn parse_settings(text: &str) -> anyhow::Result<JyotishSettings> {
    let root: RootConfigToml = toml::from_str(text).context("Failed to parse jyotish.toml")?;
    let radius = root.places.zone_radius_km;
    if !radius.is_finite() || radius <= 0.0 {
        anyhow::bail!("places.zone_radius_km must be a positive number of kilometres, got {}", radius);
    }
    Ok(root.into_settings())
}

/// Load settings from `path`, or from the default locations when `None`.
///
/// An explicit path must exist. Without one, a missing file means defaults.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<JyotishSettings> {
    let text = match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("Failed to read config {}", p.display()))?,
        None => match read_config_toml_text() {
            Ok(text) => text,
            Err(e) => {
                info!("{}; using built-in defaults", e);
                return Ok(JyotishSettings::default());
            }
        },
    };
    parse_settings(&text)
}

impl EphemerisSettings {
    /// `SWISS_EPHEMERIS_PATH` wins over the configured directory.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        env::var_os(EPHEMERIS_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, JyotishSettings::default());
        assert_eq!(settings.ephemeris.node, NodeConvention::True);
        assert_eq!(settings.places.format, PlaceFormat::Csv);
        assert_eq!(settings.places.zone_radius_km, DEFAULT_ZONE_RADIUS_KM);
        assert!(!settings.chart.require_country);
        assert!(settings.chart.text_provider);
    }

    #[test]
    fn test_full_file() {
        let text = r#"
            [ephemeris]
            path = "/opt/ephe"
            node = "mean"

            [places]
            database = "data/cities500.txt"
            format = "geonames"
            zone_radius_km = 120.0

            [chart]
            require_country = true
            text_provider = false
        "#;
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.ephemeris.path, Some(PathBuf::from("/opt/ephe")));
        assert_eq!(settings.ephemeris.node, NodeConvention::Mean);
        assert_eq!(settings.places.database, Some(PathBuf::from("data/cities500.txt")));
        assert_eq!(settings.places.format, PlaceFormat::Geonames);
        assert_eq!(settings.places.zone_radius_km, 120.0);
        assert!(settings.chart.require_country);
        assert!(!settings.chart.text_provider);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_settings("[ephemeris]\nnode = \"osculating\"\n").is_err());
        assert!(parse_settings("[places]\nformat = \"xml\"\n").is_err());
        assert!(parse_settings("[places]\nzone_radius_km = -5.0\n").is_err());
        assert!(parse_settings("[chart]\nrequire_contry = true\n").is_err());
    }

    #[test]
    fn test_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chart]\nrequire_country = true").unwrap();
        file.flush().unwrap();
        let settings = load_settings(Some(file.path())).unwrap();
        assert!(settings.chart.require_country);

        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
