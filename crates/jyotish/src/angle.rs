//! Degree helpers shared by the ephemeris and Vedic modules.

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Zodiac sign index 0..=11 (Aries = 0) for any longitude.
pub fn sign_index(longitude: f64) -> u8 {
    ((normalize_degrees(longitude) / 30.0).floor() as u8) % 12
}

/// Position inside the sign, in [0, 30).
pub fn degrees_in_sign(longitude: f64) -> f64 {
    normalize_degrees(longitude) % 30.0
}

/// Format a longitude as whole degrees and minutes inside its sign, e.g. `12°34'`.
pub fn format_dms_in_sign(longitude: f64) -> String {
    let within = degrees_in_sign(longitude);
    let deg = within.floor() as u32;
    let min = ((within - deg as f64) * 60.0).floor() as u32;
    format!("{}°{:02}'", deg, min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn test_sign_index() {
        assert_eq!(sign_index(0.0), 0);
        assert_eq!(sign_index(29.999), 0);
        assert_eq!(sign_index(30.0), 1);
        assert_eq!(sign_index(359.9), 11);
        assert_eq!(sign_index(-1.0), 11);
        assert_eq!(sign_index(395.0), 1);
    }

    #[test]
    fn test_format_dms_in_sign() {
        assert_eq!(format_dms_in_sign(42.5), "12°30'");
        assert_eq!(format_dms_in_sign(29.9999), "29°59'");
    }
}
