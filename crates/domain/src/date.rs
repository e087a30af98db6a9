use chrono::{prelude::*, LocalResult};
use chrono_tz::Tz;

pub const MINUTE_MILLIS: i64 = 1000 * 60;
pub const HOUR_MILLIS: i64 = MINUTE_MILLIS * 60;
pub const DAY_MILLIS: i64 = HOUR_MILLIS * 24;

/// Timestamp in millis of the given wall clock time in the given timezone.
///
/// Ambiguous local times (DST fold) resolve to the earliest instant, and
/// local times that do not exist (DST gap) are read as if they were UTC.
pub fn to_timestamp(date: NaiveDate, time: NaiveTime, tz: &Tz) -> i64 {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => tz.from_utc_datetime(&naive).timestamp_millis(),
    }
}

pub fn start_of_day(date: NaiveDate, tz: &Tz) -> i64 {
    to_timestamp(date, NaiveTime::MIN, tz)
}

/// The calendar date the timestamp falls on in the given timezone
pub fn local_date(ts: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(ts)
        .single()
        .map(|dt| dt.date_naive())
}

pub fn format_date(date: &NaiveDate) -> String {
    // 2001-07-08
    date.format("%F").to_string()
}

/// Parses an ISO-8601 / RFC 3339 timestamp into millis
pub fn parse_timestamp(datestr: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(datestr.trim())
        .ok()
        .map(|dt| dt.timestamp_millis())
}

pub fn format_timestamp(ts: i64) -> String {
    match Utc.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => ts.to_string(),
    }
}
