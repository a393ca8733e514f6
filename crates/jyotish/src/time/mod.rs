//! Local civil time to UTC offset and Julian day conversions.

pub mod julian;
pub mod offset;

pub use julian::{datetime_to_julian_day, julian_day_ut, local_to_utc, UTC_OFFSET_RANGE_HOURS};
pub use offset::{local_offset, offset_hours_at, parse_date, parse_local, parse_time, parse_zone, DateTimeError};
