//! Ayanamsa computation for the sidereal frames the adapter supports.
//!
//! The ayanamsa at any epoch is the frame's J2000.0 reference value plus the
//! IAU 2006 general precession in ecliptic longitude accumulated since J2000.0.
//! It is evaluated per call from the Julian day, so no process-wide sidereal
//! mode ever needs to be set on the underlying ephemeris library.

use crate::angle::normalize_degrees;
use crate::ephemeris::types::SiderealMode;

/// Julian day of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// General precession in longitude p_A (IAU 2006), degrees.
///
/// `t` = Julian centuries since J2000.0. UT is used in place of TT; the
/// difference is far below a second of arc over historical birth dates.
pub fn general_precession_deg(t: f64) -> f64 {
    let arcsec = 5028.796195 * t + 1.1054348 * t.powi(2) + 0.00007964 * t.powi(3)
        - 0.000023857 * t.powi(4)
        - 0.0000000383 * t.powi(5);
    arcsec / 3600.0
}

impl SiderealMode {
    /// Reference ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            // Spica at 0 deg Libra sidereal
            Self::Lahiri => 23.853,
        }
    }

    /// Ayanamsa in degrees for the given Julian day (UT).
    pub fn ayanamsa_deg(self, jd_ut: f64) -> f64 {
        let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
        self.reference_j2000_deg() + general_precession_deg(t)
    }

    /// Convert a tropical longitude to this sidereal frame, in [0, 360).
    pub fn to_sidereal(self, tropical_deg: f64, jd_ut: f64) -> f64 {
        normalize_degrees(tropical_deg - self.ayanamsa_deg(jd_ut))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lahiri_at_j2000() {
        let value = SiderealMode::Lahiri.ayanamsa_deg(J2000_JD);
        assert!((value - 23.853).abs() < 1e-9);
    }

    #[test]
    fn test_lahiri_grows_about_fifty_arcsec_per_year() {
        let year_later = J2000_JD + 365.25;
        let delta = SiderealMode::Lahiri.ayanamsa_deg(year_later) - SiderealMode::Lahiri.ayanamsa_deg(J2000_JD);
        assert!((delta * 3600.0 - 50.29).abs() < 0.05);
    }

    #[test]
    fn test_lahiri_in_2024_matches_published_value() {
        // 2024-01-01 00:00 UT; published Lahiri value is about 24 deg 11'
        let jd = 2_460_310.5;
        let value = SiderealMode::Lahiri.ayanamsa_deg(jd);
        assert!((value - 24.19).abs() < 0.02, "got {}", value);
    }

    #[test]
    fn test_to_sidereal_wraps() {
        let sidereal = SiderealMode::Lahiri.to_sidereal(10.0, J2000_JD);
        assert!((sidereal - (360.0 + 10.0 - 23.853)).abs() < 1e-9);
    }
}
