//! Configuration types for the mock generators.
//!
//! Every field has a default, so a YAML file only needs to list the
//! settings it overrides.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{MockError, MockResult};

/// Largest day count any day range may reach (roughly a thousand years).
pub const MAX_RANGE_DAYS: i64 = 365_000;

/// Largest overtime reduction, in hours, a single absence may carry.
pub const MAX_OVERTIME_HOURS: f64 = 24.0;

/// An inclusive `min..=max` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    /// Lower bound.
    pub min: T,
    /// Upper bound.
    pub max: T,
}

impl<T> Bounds<T> {
    /// Creates a range from its two ends.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

/// Weights of the random decisions made per absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Probabilities {
    /// Chance an absence is an overtime reduction.
    pub overtime_reduction: f64,
    /// Chance a non-overtime absence is a sick day.
    pub sick: f64,
    /// Chance a non-overtime absence is a half day.
    pub half_day: f64,
    /// Chance an absence has a note.
    pub note: f64,
    /// Chance the status is forced to approved before the uniform draw.
    pub forced_approval: f64,
    /// Chance the enquiry date is left out.
    pub missing_date_enquired: f64,
    /// Chance a sick absence is for a child rather than the employee.
    pub sick_day_of_child: f64,
    /// Chance a sick absence has a medical certificate.
    pub sick_note: f64,
}

impl Default for Probabilities {
    fn default() -> Self {
        Self {
            overtime_reduction: 0.2,
            sick: 0.2,
            half_day: 0.4,
            note: 0.2,
            forced_approval: 0.4,
            missing_date_enquired: 0.6,
            sick_day_of_child: 0.5,
            sick_note: 0.5,
        }
    }
}

impl Probabilities {
    fn validate(&self) -> MockResult<()> {
        let named = [
            ("overtime_reduction", self.overtime_reduction),
            ("sick", self.sick),
            ("half_day", self.half_day),
            ("note", self.note),
            ("forced_approval", self.forced_approval),
            ("missing_date_enquired", self.missing_date_enquired),
            ("sick_day_of_child", self.sick_day_of_child),
            ("sick_note", self.sick_note),
        ];
        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(MockError::InvalidProbability {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Settings for [`crate::mocks::create_absence_mocks_with`].
///
/// # Example
///
/// ```
/// use absence_mocks::config::MockConfig;
///
/// let config = MockConfig::default();
/// assert_eq!(config.probabilities.overtime_reduction, 0.2);
/// assert_eq!(config.max_duplicates, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Weights of the per-record random decisions.
    pub probabilities: Probabilities,
    /// Window used when the caller does not pass one.
    pub date_since_between: (NaiveDateTime, NaiveDateTime),
    /// Owner written to every record.
    pub users_id: u64,
    /// Approver written to approved records.
    pub approver_id: u64,
    /// How many times one raw date may occur in a batch.
    pub max_duplicates: usize,
    /// Days added to `date_since` to get `date_until` (before clamping).
    pub span_days: Bounds<i64>,
    /// Days between the enquiry and `date_since`.
    pub enquiry_lead_days: Bounds<i64>,
    /// Days between the enquiry and the approval.
    pub approval_delay_days: Bounds<i64>,
    /// Days knocked off the calendar span when computing `count_days`.
    pub count_days_discount: Bounds<i64>,
    /// Length of generated notes, in words.
    pub note_words: Bounds<usize>,
    /// Hours taken off by an overtime reduction.
    pub overtime_hours: Bounds<f64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            probabilities: Probabilities::default(),
            date_since_between: (year_start(2020), year_start(2021)),
            users_id: 0,
            approver_id: 1,
            max_duplicates: 2,
            span_days: Bounds::new(0, 30),
            enquiry_lead_days: Bounds::new(5, 200),
            approval_delay_days: Bounds::new(0, 4),
            count_days_discount: Bounds::new(0, 3),
            note_words: Bounds::new(2, 10),
            overtime_hours: Bounds::new(0.1, 8.0),
        }
    }
}

impl MockConfig {
    /// Checks that every probability, range and window is usable.
    ///
    /// # Errors
    ///
    /// - [`MockError::InvalidProbability`] for a probability outside `[0, 1]`
    /// - [`MockError::InvalidRange`] for an empty range, a day range that is
    ///   negative or longer than [`MAX_RANGE_DAYS`], or an overtime range that
    ///   is not within `(0, MAX_OVERTIME_HOURS]`
    /// - [`MockError::InvalidDateRange`] when the default window is reversed
    /// - [`MockError::InvalidMaxDuplicates`] when `max_duplicates` is zero
    pub fn validate(&self) -> MockResult<()> {
        self.probabilities.validate()?;

        let (from, to) = self.date_since_between;
        if from > to {
            return Err(MockError::InvalidDateRange { from, to });
        }
        if self.max_duplicates == 0 {
            return Err(MockError::InvalidMaxDuplicates);
        }

        let day_ranges = [
            ("span_days", self.span_days),
            ("enquiry_lead_days", self.enquiry_lead_days),
            ("approval_delay_days", self.approval_delay_days),
            ("count_days_discount", self.count_days_discount),
        ];
        for (name, range) in day_ranges {
            if range.min < 0 || range.min > range.max || range.max > MAX_RANGE_DAYS {
                return Err(invalid_range(name, range.min as f64, range.max as f64));
            }
        }

        if self.note_words.min > self.note_words.max {
            return Err(invalid_range(
                "note_words",
                self.note_words.min as f64,
                self.note_words.max as f64,
            ));
        }

        let hours = self.overtime_hours;
        if !(hours.min > 0.0 && hours.min <= hours.max && hours.max <= MAX_OVERTIME_HOURS) {
            return Err(invalid_range("overtime_hours", hours.min, hours.max));
        }

        Ok(())
    }
}

fn invalid_range(name: &str, min: f64, max: f64) -> MockError {
    MockError::InvalidRange {
        name: name.to_string(),
        min,
        max,
    }
}

fn year_start(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}
