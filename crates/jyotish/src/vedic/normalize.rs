//! Sidereal longitude set for one chart instant.

use log::debug;

use crate::angle::normalize_degrees;
use crate::ephemeris::{EphemerisError, EphemerisProvider, NodeConvention, SiderealMode};
use crate::vedic::types::{SiderealLongitudes, COMPUTED_PLANETS};

/// The only sidereal frame charts are computed in.
pub const CHART_SIDEREAL_MODE: SiderealMode = SiderealMode::Lahiri;

/// Query Sun..Saturn and Rahu at `jd_ut` in the Lahiri frame.
///
/// Provider failures are returned as-is; deciding whether to fall back is the
/// caller's job.
pub fn sidereal_longitudes<P>(
    provider: &P,
    jd_ut: f64,
    node: NodeConvention,
) -> Result<SiderealLongitudes, EphemerisError>
where
    P: EphemerisProvider + ?Sized,
{
    let mut values = [0.0; 8];
    for (slot, planet) in values.iter_mut().zip(COMPUTED_PLANETS.iter()) {
        let lon = provider.longitude(jd_ut, *planet, CHART_SIDEREAL_MODE, node)?;
        *slot = normalize_degrees(lon);
    }
    debug!("sidereal longitudes at JD {:.5} ({} node): {:?}", jd_ut, node, values);
    Ok(SiderealLongitudes::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::FixedEphemeris;
    use crate::vedic::types::Planet;

    fn fixture() -> FixedEphemeris {
        FixedEphemeris::from_longitudes(&[
            (Planet::Sun, 375.0),
            (Planet::Moon, 200.0),
            (Planet::Mars, 95.0),
            (Planet::Mercury, -350.0),
            (Planet::Jupiter, 340.0),
            (Planet::Venus, 75.0),
            (Planet::Saturn, 260.0),
            (Planet::Rahu, 100.0),
        ])
        .with_mean_rahu(101.5)
    }

    #[test]
    fn test_values_are_normalized() {
        let lons = sidereal_longitudes(&fixture(), 2_451_545.0, NodeConvention::True).unwrap();
        assert_eq!(lons.get(Planet::Sun), 15.0);
        assert_eq!(lons.get(Planet::Mercury), 10.0);
        assert_eq!(lons.get(Planet::Ketu), 280.0);
    }

    #[test]
    fn test_node_convention_selects_rahu() {
        let eph = fixture();
        let true_node = sidereal_longitudes(&eph, 2_451_545.0, NodeConvention::True).unwrap();
        let mean_node = sidereal_longitudes(&eph, 2_451_545.0, NodeConvention::Mean).unwrap();
        assert_eq!(true_node.get(Planet::Rahu), 100.0);
        assert_eq!(mean_node.get(Planet::Rahu), 101.5);
    }

    #[test]
    fn test_provider_failure_propagates() {
        let eph = FixedEphemeris::from_longitudes(&[(Planet::Sun, 1.0)]);
        let err = sidereal_longitudes(&eph, 2_451_545.0, NodeConvention::True).unwrap_err();
        assert!(matches!(err, EphemerisError::CalculationFailed { body: Planet::Moon, .. }));
    }
}
