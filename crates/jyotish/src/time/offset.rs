use chrono::{Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

/// Malformed or unresolvable local date/time input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateTimeError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD with a real calendar day")]
    InvalidDate { input: String },
    #[error("Invalid time '{input}': expected 24-hour HH:MM or HH:MM:SS")]
    InvalidTime { input: String },
    #[error("Unknown time zone '{zone}'")]
    UnknownZone { zone: String },
    #[error("UTC offset {hours} h is outside -12..=+14")]
    InvalidOffset { hours: f64 },
    #[error("Date/time '{input}' is outside the supported calendar range")]
    OutOfRange { input: String },
}

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

pub fn parse_date(date: &str) -> Result<NaiveDate, DateTimeError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| DateTimeError::InvalidDate {
        input: date.to_string(),
    })
}

pub fn parse_time(time: &str) -> Result<NaiveTime, DateTimeError> {
    let trimmed = time.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DateTimeError::InvalidTime {
            input: time.to_string(),
        })
}

pub fn parse_local(date: &str, time: &str) -> Result<NaiveDateTime, DateTimeError> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

pub fn parse_zone(zone: &str) -> Result<Tz, DateTimeError> {
    zone.trim().parse::<Tz>().map_err(|_| DateTimeError::UnknownZone {
        zone: zone.to_string(),
    })
}

/// UTC offset in hours for a local wall-clock time in `zone`.
///
/// Ambiguous wall times (clocks going back) use the earlier instant. Wall
/// times skipped by a forward change use the offset in force just before it.
pub fn offset_hours_at(zone: Tz, local: NaiveDateTime) -> f64 {
    let seconds = match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.offset().fix().local_minus_utc(),
        LocalResult::Ambiguous(earliest, _) => earliest.offset().fix().local_minus_utc(),
        LocalResult::None => {
            // Step back out of the gap; no real zone has a gap wider than a day
            let mut probe = local;
            let mut found = None;
            for _ in 0..96 {
                let Some(earlier) = probe.checked_sub_signed(Duration::minutes(15)) else {
                    break;
                };
                probe = earlier;
                if let Some(dt) = zone.from_local_datetime(&probe).earliest() {
                    found = Some(dt.offset().fix().local_minus_utc());
                    break;
                }
            }
            found.unwrap_or_else(|| zone.offset_from_utc_datetime(&local).fix().local_minus_utc())
        }
    };
    seconds as f64 / 3600.0
}

/// Signed UTC offset, in fractional hours, in effect at a local date and time.
///
/// `date` is `YYYY-MM-DD`, `time` is 24-hour `HH:MM` (seconds optional) and
/// `zone` is an IANA identifier such as `Europe/Ljubljana`.
pub fn local_offset(date: &str, time: &str, zone: &str) -> Result<f64, DateTimeError> {
    let local = parse_local(date, time)?;
    let tz = parse_zone(zone)?;
    Ok(offset_hours_at(tz, local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ljubljana_summer_and_winter() {
        assert_eq!(local_offset("2024-06-21", "12:00", "Europe/Ljubljana"), Ok(2.0));
        assert_eq!(local_offset("2024-01-15", "12:00", "Europe/Ljubljana"), Ok(1.0));
    }

    #[test]
    fn test_fractional_and_negative_offsets() {
        assert_eq!(local_offset("2024-03-01", "08:30", "Asia/Kolkata"), Ok(5.5));
        assert_eq!(local_offset("2024-07-04", "09:00", "America/New_York"), Ok(-4.0));
        assert_eq!(local_offset("2024-07-04", "09:00", "Asia/Kathmandu"), Ok(5.75));
    }

    #[test]
    fn test_transition_edges() {
        // 2024-03-31 02:30 does not exist in Ljubljana; offset before the jump
        assert_eq!(local_offset("2024-03-31", "02:30", "Europe/Ljubljana"), Ok(1.0));
        // 2024-10-27 02:30 happens twice; the earlier one is still summer time
        assert_eq!(local_offset("2024-10-27", "02:30", "Europe/Ljubljana"), Ok(2.0));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            local_offset("2024-13-01", "12:00", "UTC"),
            Err(DateTimeError::InvalidDate { .. })
        ));
        assert!(matches!(
            local_offset("2023-02-29", "12:00", "UTC"),
            Err(DateTimeError::InvalidDate { .. })
        ));
        assert!(matches!(
            local_offset("2024-01-01", "24:00", "UTC"),
            Err(DateTimeError::InvalidTime { .. })
        ));
        assert!(matches!(
            local_offset("2024-01-01", "12:60", "UTC"),
            Err(DateTimeError::InvalidTime { .. })
        ));
        assert!(matches!(
            local_offset("2024-01-01", "12:00", "Mars/Olympus_Mons"),
            Err(DateTimeError::UnknownZone { .. })
        ));
    }

    #[test]
    fn test_accepts_seconds() {
        assert_eq!(local_offset("2024-01-15", "23:59:59", "UTC"), Ok(0.0));
    }
}
