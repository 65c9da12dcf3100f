//! Random date sequences used as raw material for date pairs.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{MockError, MockResult};
use crate::random::RandomSource;

/// Parameters for [`generate_random_dates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDatesOptions {
    /// How many date-times to produce.
    pub count: usize,
    /// Inclusive window every date-time is drawn from.
    pub between: (NaiveDateTime, NaiveDateTime),
    /// How many times one value may appear in the output (at least 1).
    pub max_duplicates: usize,
}

impl Default for RandomDatesOptions {
    fn default() -> Self {
        let from = NaiveDate::from_ymd_opt(2020, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN);
        let to = NaiveDate::from_ymd_opt(2021, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN);
        Self {
            count: 1,
            between: (from, to),
            max_duplicates: 1,
        }
    }
}

/// Extra draws made for a value that already reached `max_duplicates`.
const MAX_RESAMPLES: usize = 8;

/// Draws `count` date-times independently and uniformly from the window.
///
/// No value appears more than `max_duplicates` times. A draw that would
/// exceed the allowance is re-sampled a few times, then nudged to the nearest
/// free millisecond inside the window. Only a window with fewer free
/// milliseconds than `count` requires can still repeat a value beyond the
/// allowance. The result is in generation order, not sorted.
///
/// # Errors
///
/// - [`MockError::InvalidDateRange`] when the window's start is after its end
/// - [`MockError::InvalidMaxDuplicates`] when `max_duplicates` is zero
///
/// # Example
///
/// ```
/// use absence_mocks::dates::{generate_random_dates, RandomDatesOptions};
/// use absence_mocks::random::SeededRandom;
///
/// let mut rng = SeededRandom::new(3);
/// let options = RandomDatesOptions { count: 10, max_duplicates: 2, ..Default::default() };
/// let dates = generate_random_dates(&mut rng, &options).unwrap();
/// assert_eq!(dates.len(), 10);
/// ```
pub fn generate_random_dates(
    rng: &mut dyn RandomSource,
    options: &RandomDatesOptions,
) -> MockResult<Vec<NaiveDateTime>> {
    let (from, to) = options.between;
    if from > to {
        return Err(MockError::InvalidDateRange { from, to });
    }
    if options.max_duplicates == 0 {
        return Err(MockError::InvalidMaxDuplicates);
    }

    let mut dates = Vec::with_capacity(options.count);
    let mut occurrences: HashMap<NaiveDateTime, usize> = HashMap::with_capacity(options.count);
    let is_full = |occurrences: &HashMap<NaiveDateTime, usize>, date: &NaiveDateTime| {
        occurrences.get(date).copied().unwrap_or(0) >= options.max_duplicates
    };

    for _ in 0..options.count {
        let mut date = rng.date_time_between(from, to);
        for _ in 0..MAX_RESAMPLES {
            if !is_full(&occurrences, &date) {
                break;
            }
            date = rng.date_time_between(from, to);
        }
        if is_full(&occurrences, &date) {
            date = nearest_free(date, options, |candidate| is_full(&occurrences, candidate))
                .unwrap_or(date);
        }

        *occurrences.entry(date).or_insert(0) += 1;
        dates.push(date);
    }

    Ok(dates)
}

/// Walks outward from `date` one millisecond at a time for a value that is
/// inside the window and not yet full.
fn nearest_free(
    date: NaiveDateTime,
    options: &RandomDatesOptions,
    is_full: impl Fn(&NaiveDateTime) -> bool,
) -> Option<NaiveDateTime> {
    let (from, to) = options.between;
    // at most `count` values can be full, so a free one lies within `count` steps
    let max_steps = i64::try_from(options.count)
        .unwrap_or(i64::MAX)
        .min((to - from).num_milliseconds());

    (1..=max_steps).find_map(|step| {
        let delta = Duration::try_milliseconds(step)?;
        [date.checked_add_signed(delta), date.checked_sub_signed(delta)]
            .into_iter()
            .flatten()
            .find(|candidate| *candidate >= from && *candidate <= to && !is_full(candidate))
    })
}
