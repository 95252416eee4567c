//! Time alignment and input resolution for daylight queries.
//!
//! The pipeline consumes a whole-hour UTC offset, an hour of day and a day
//! of year. This module derives those from timezone-aware date/times and
//! validates the `HH:MM[:SS]` / `YYYY-MM-DD` string inputs accepted at the
//! outer edge.

#[cfg(feature = "chrono")]
use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::offset::LocalResult;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

/// Seconds per hour (3,600)
const SECONDS_PER_HOUR: i64 = 3_600;

/// Converts a wall-clock local-minus-UTC difference in seconds into a whole
/// hour offset, flooring toward negative infinity.
///
/// Fractional offsets lose their sub-hour part: +05:30 becomes +5, -03:30
/// becomes -4.
#[must_use]
pub fn offset_hours_from_seconds(local_minus_utc_seconds: i64) -> i32 {
    let hours = local_minus_utc_seconds.div_euclid(SECONDS_PER_HOUR);
    i32::try_from(hours).unwrap_or(if hours < 0 { i32::MIN } else { i32::MAX })
}

/// Derives the whole-hour UTC offset of a date/time from the difference
/// between its local and UTC wall-clock representations.
#[cfg(feature = "chrono")]
pub fn utc_offset_hours<Tz: TimeZone>(datetime: &DateTime<Tz>) -> i32 {
    let delta = datetime.naive_local() - datetime.naive_utc();
    offset_hours_from_seconds(delta.num_seconds())
}

/// Gets the day of year (1 to 366) of a local date/time.
#[cfg(feature = "chrono")]
pub fn day_of_year<Tz: TimeZone>(datetime: &DateTime<Tz>) -> u32 {
    datetime.ordinal()
}

/// Gets the local time of day as fractional hours since midnight.
#[cfg(feature = "chrono")]
pub fn local_time_hours<Tz: TimeZone>(datetime: &DateTime<Tz>) -> f64 {
    f64::from(datetime.hour())
        + f64::from(datetime.minute()) / 60.0
        + (f64::from(datetime.second()) + f64::from(datetime.nanosecond()) / 1e9) / 3_600.0
}

/// Parses a time-of-day string in `HH:MM` or `HH:MM:SS` form.
///
/// Single-digit fields are accepted (`7:05` parses as 07:05:00).
///
/// # Errors
/// Returns `InvalidDateTime` for malformed or out-of-range input.
///
/// # Example
/// ```
/// # use solar_illuminance::time::parse_time;
/// let time = parse_time("12:30").unwrap();
/// assert_eq!(time.to_string(), "12:30:00");
/// assert!(parse_time("25:00").is_err());
/// ```
#[cfg(feature = "chrono")]
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| Error::invalid_datetime("time must be in HH:MM or HH:MM:SS format"))
}

/// Parses a calendar date string in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns `InvalidDateTime` for malformed input or impossible dates.
///
/// # Example
/// ```
/// # use solar_illuminance::time::parse_date;
/// assert!(parse_date("2023-06-21").is_ok());
/// assert!(parse_date("2023-02-30").is_err());
/// assert!(parse_date("21.06.2023").is_err());
/// ```
#[cfg(feature = "chrono")]
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| Error::invalid_datetime("date must be in YYYY-MM-DD format"))
}

/// Resolves optional date and time strings to a timezone-aware date/time,
/// defaulting omitted parts to the current moment in the given timezone.
///
/// Ambiguous local times (clocks rolled back) resolve to the earlier
/// instant; nonexistent ones (clocks rolled forward) are an error.
///
/// # Errors
/// Returns `InvalidDateTime` for malformed strings or a local time that does
/// not exist in the timezone.
#[cfg(all(feature = "std", feature = "chrono"))]
pub fn resolve<Tz: TimeZone>(
    timezone: &Tz,
    date: Option<&str>,
    time: Option<&str>,
) -> Result<DateTime<Tz>> {
    let now = chrono::Utc::now().with_timezone(timezone);
    let day = match date {
        Some(input) => parse_date(input)?,
        None => now.date_naive(),
    };
    let time_of_day = match time {
        Some(input) => parse_time(input)?,
        None => now.time(),
    };
    local_datetime(timezone, day.and_time(time_of_day))
}

/// Maps a naive local date/time into the given timezone.
///
/// Ambiguous mappings take the earlier instant; gaps are an error.
#[cfg(feature = "chrono")]
pub(crate) fn local_datetime<Tz: TimeZone>(
    timezone: &Tz,
    naive: NaiveDateTime,
) -> Result<DateTime<Tz>> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(datetime) => Ok(datetime),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        LocalResult::None => Err(Error::invalid_datetime(
            "local time does not exist in this timezone",
        )),
    }
}
