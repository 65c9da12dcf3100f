//! Day and year boundaries, and pairing of generated dates.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{MockError, MockResult};

/// Twenty-four hours.
pub const ONE_DAY: Duration = Duration::days(1);

/// Truncates a date-time to midnight of the same day.
///
/// # Example
///
/// ```
/// use absence_mocks::dates::start_of_day;
/// use chrono::NaiveDateTime;
///
/// let dt = NaiveDateTime::parse_from_str("2020-05-17 15:42:10", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(start_of_day(dt).to_string(), "2020-05-17 00:00:00");
/// ```
pub fn start_of_day(date_time: NaiveDateTime) -> NaiveDateTime {
    date_time.date().and_time(NaiveTime::MIN)
}

/// Returns the last instant (23:59:59.999) of the date-time's calendar year.
///
/// # Example
///
/// ```
/// use absence_mocks::dates::end_of_year;
/// use chrono::NaiveDateTime;
///
/// let dt = NaiveDateTime::parse_from_str("2020-05-17 15:42:10", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(end_of_year(dt).to_string(), "2020-12-31 23:59:59.999");
/// ```
pub fn end_of_year(date_time: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date_time.year(), 12, 31)
        .and_then(|last_day| last_day.and_hms_milli_opt(23, 59, 59, 999))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Moves a date-time by a whole number of days.
///
/// Returns `None` when the result falls outside the representable range.
///
/// # Example
///
/// ```
/// use absence_mocks::dates::shift_days;
/// use chrono::NaiveDateTime;
///
/// let dt = NaiveDateTime::parse_from_str("2020-12-30 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(shift_days(dt, 3).unwrap().to_string(), "2021-01-02 08:00:00");
/// assert!(shift_days(NaiveDateTime::MAX, 1).is_none());
/// ```
pub fn shift_days(date_time: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    Duration::try_days(days).and_then(|delta| date_time.checked_add_signed(delta))
}

/// Sorts `dates` ascending and groups consecutive entries into `(from, until)` pairs.
///
/// Duplicates are kept; pairing is positional, so two equal neighbours
/// become a zero-length pair. Every pair satisfies `from <= until`.
///
/// # Errors
///
/// Returns [`MockError::OddDateCount`] when `dates` has an odd length.
///
/// # Example
///
/// ```
/// use absence_mocks::dates::to_pairs;
///
/// let pairs = to_pairs(vec![9, 1, 4, 4]).unwrap();
/// assert_eq!(pairs, vec![(1, 4), (4, 9)]);
/// ```
pub fn to_pairs<T: Ord + Copy>(mut dates: Vec<T>) -> MockResult<Vec<(T, T)>> {
    if dates.len() % 2 != 0 {
        return Err(MockError::OddDateCount { count: dates.len() });
    }

    dates.sort_unstable();

    Ok(dates
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect())
}
