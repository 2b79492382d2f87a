//! Display timestamps
//!
//! Pages show times with a fixed +8 hour offset applied to the raw value,
//! rendered as `YYYY/M/D HH:MM:SS`. This is a display convention, not a
//! timezone conversion: listing times are shifted as-is.

use chrono::{Duration, NaiveDateTime, Utc};

/// Hours added to every displayed timestamp
pub const DISPLAY_OFFSET_HOURS: i64 = 8;

const DISPLAY_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";
const LISTING_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shift and render a timestamp for display
pub fn display_time(time: NaiveDateTime) -> String {
  (time + Duration::hours(DISPLAY_OFFSET_HOURS)).format(DISPLAY_FORMAT).to_string()
}

/// Render a storage listing `date time` pair for display
///
/// Values that do not parse are passed through unchanged.
pub fn listing_time(date: &str, time: &str) -> String {
  let raw = format!("{} {}", date, time);
  match NaiveDateTime::parse_from_str(&raw, LISTING_FORMAT) {
    Ok(parsed) => display_time(parsed),
    Err(_) => raw,
  }
}

/// Current time for display
pub fn now_display() -> String {
  display_time(Utc::now().naive_utc())
}
