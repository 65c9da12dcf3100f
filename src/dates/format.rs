//! ISO calendar date formatting.

use chrono::NaiveDateTime;

/// Returns the calendar date of `date_time` as `YYYY-MM-DD`, dropping the time of day.
///
/// # Example
///
/// ```
/// use absence_mocks::dates::iso_date_from_date_time;
/// use chrono::NaiveDateTime;
///
/// let dt = NaiveDateTime::parse_from_str("2020-03-09 23:59:59", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(iso_date_from_date_time(dt), "2020-03-09");
/// ```
pub fn iso_date_from_date_time(date_time: NaiveDateTime) -> String {
    date_time.format("%Y-%m-%d").to_string()
}
