use jyotish::ephemeris::{
    EphemerisProvider, GeoLocation, NodeConvention, SiderealMode, SwissEphemerisAdapter,
};
use jyotish::time::julian_day_ut;
use jyotish::{compute_chart, Planet};

fn adapter() -> SwissEphemerisAdapter {
    SwissEphemerisAdapter::new(None).unwrap()
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_sidereal_sun_near_j2000() {
    let jd = julian_day_ut("2000-01-01", "12:00", 0.0).unwrap();
    let sun = adapter()
        .longitude(jd, Planet::Sun, SiderealMode::Lahiri, NodeConvention::True)
        .unwrap();
    // Tropical ~280.37, minus ~23.85 ayanamsa
    assert!((sun - 256.52).abs() < 0.1, "sun = {}", sun);
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_mean_and_true_node_differ_slightly() {
    let eph = adapter();
    let jd = julian_day_ut("1990-05-17", "08:45", 2.0).unwrap();
    let mean = eph.longitude(jd, Planet::Rahu, SiderealMode::Lahiri, NodeConvention::Mean).unwrap();
    let tru = eph.longitude(jd, Planet::Rahu, SiderealMode::Lahiri, NodeConvention::True).unwrap();
    let diff = (mean - tru + 540.0) % 360.0 - 180.0;
    assert!(diff.abs() < 2.5, "mean {} true {}", mean, tru);
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_houses_and_chart() {
    let eph = adapter();
    let jd = julian_day_ut("2024-06-21", "12:00", 2.0).unwrap();
    let cusps = eph
        .ascendant_and_cusps(jd, GeoLocation::new(46.05108, 14.50513), SiderealMode::Lahiri)
        .unwrap();
    assert!((0.0..360.0).contains(&cusps.ascendant));

    let chart = compute_chart(&eph, jd, 46.05108, 14.50513, NodeConvention::True).unwrap();
    assert_eq!(chart.karakas.seven.len(), 7);
    assert_eq!(chart.karakas.eight.len(), 8);
}

#[test]
fn test_missing_ephemeris_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-ephe");
    assert!(SwissEphemerisAdapter::new(Some(missing)).is_err());
}
