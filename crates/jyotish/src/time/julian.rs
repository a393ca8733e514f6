use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use std::ops::RangeInclusive;

use crate::time::offset::{parse_local, DateTimeError};

/// Julian day of the Unix epoch, 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Civil UTC offsets in use worldwide, in hours.
pub const UTC_OFFSET_RANGE_HOURS: RangeInclusive<f64> = -12.0..=14.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian day (UT) of a UTC instant.
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// UTC instant for a local wall-clock time at a fixed offset in hours.
///
/// Offsets outside [`UTC_OFFSET_RANGE_HOURS`] and instants past chrono's
/// representable range are errors.
pub fn local_to_utc(local: NaiveDateTime, offset_hours: f64) -> Result<DateTime<Utc>, DateTimeError> {
    if !UTC_OFFSET_RANGE_HOURS.contains(&offset_hours) {
        return Err(DateTimeError::InvalidOffset { hours: offset_hours });
    }
    let offset = Duration::milliseconds((offset_hours * 3_600_000.0).round() as i64);
    let utc = local
        .checked_sub_signed(offset)
        .ok_or_else(|| DateTimeError::OutOfRange {
            input: format!("{} (UTC{:+})", local, offset_hours),
        })?;
    Ok(Utc.from_utc_datetime(&utc))
}

/// Julian day (UT) for a local date/time string pair and a UTC offset in hours.
pub fn julian_day_ut(date: &str, time: &str, offset_hours: f64) -> Result<f64, DateTimeError> {
    let local = parse_local(date, time)?;
    Ok(datetime_to_julian_day(local_to_utc(local, offset_hours)?))
}
