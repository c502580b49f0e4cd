//! Epoch conversion and a rough US cash-session check.

use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc, Weekday};

/// First UTC hour counted as open (09:30 ET rounded down to the hour).
pub const SESSION_OPEN_HOUR_UTC: u32 = 14;
/// First UTC hour counted as closed (16:00 ET).
pub const SESSION_CLOSE_HOUR_UTC: u32 = 21;

/// Converts unix seconds to UTC. Out-of-range values map to the epoch.
pub fn utc_from_unix(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

/// ISO-8601 with millisecond precision and a `Z` suffix,
/// e.g. `2024-01-02T15:00:00.000Z`.
pub fn iso_datetime(timestamp: i64) -> String {
    utc_from_unix(timestamp).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Weekday between Monday and Friday and UTC hour in `[14, 21)`.
///
/// This approximates the NYSE/Nasdaq session only: it ignores holidays,
/// daylight saving shifts and the 09:30 open minute.
pub fn is_market_open(timestamp: i64) -> bool {
    let at = utc_from_unix(timestamp);
    let weekday = !matches!(at.weekday(), Weekday::Sat | Weekday::Sun);
    weekday && (SESSION_OPEN_HOUR_UTC..SESSION_CLOSE_HOUR_UTC).contains(&at.hour())
}
