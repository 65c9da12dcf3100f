//! Synthetic absence records.
//!
//! This module builds batches of [`Absence`] records whose values are random
//! but which always satisfy the model invariants (see
//! [`Absence::check_invariants`]).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::{debug, trace};

use crate::config::MockConfig;
use crate::dates::{
    ONE_DAY, RandomDatesOptions, end_of_year, generate_random_dates, iso_date_from_date_time,
    shift_days, start_of_day, to_pairs,
};
use crate::error::{MockError, MockResult};
use crate::models::{Absence, AbsenceDetails, AbsenceStatus, AbsenceType};
use crate::random::{RandomSource, ThreadRandom, pick};

/// Parameters for one batch of absence mocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsenceMockOptions {
    /// Number of records to generate.
    pub count: usize,
    /// Window `date_since` is drawn from; `None` uses the configured default.
    pub date_since_between: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl Default for AbsenceMockOptions {
    fn default() -> Self {
        Self {
            count: 1,
            date_since_between: None,
        }
    }
}

/// Generates `options.count` absences with the thread RNG and default settings.
///
/// # Errors
///
/// - [`MockError::InvalidDateRange`] when the window's start is after its end
/// - [`MockError::CountTooLarge`] when `options.count` cannot be doubled
///
/// # Example
///
/// ```
/// use absence_mocks::mocks::{create_absence_mocks, AbsenceMockOptions};
///
/// let absences = create_absence_mocks(&AbsenceMockOptions { count: 25, ..Default::default() }).unwrap();
/// assert_eq!(absences.len(), 25);
/// assert!(absences.iter().all(|a| a.check_invariants().is_ok()));
/// ```
pub fn create_absence_mocks(options: &AbsenceMockOptions) -> MockResult<Vec<Absence>> {
    let mut rng = ThreadRandom::new();
    create_absence_mocks_with(&mut rng, &MockConfig::default(), options)
}

/// Generates `options.count` absences drawing every random value from `rng`.
///
/// Records come back in index order: `id` equals the position in the batch.
/// Plain absences cycle through [`AbsenceType::PLAIN`] by index, so a batch of
/// at least eleven records contains every plain type that is not crowded out
/// by the overtime and sick branches at those positions.
///
/// # Errors
///
/// - [`MockError::InvalidDateRange`] when the window's start is after its end
/// - [`MockError::CountTooLarge`] when `options.count` cannot be doubled
/// - any error from [`MockConfig::validate`]
///
/// # Example
///
/// ```
/// use absence_mocks::config::MockConfig;
/// use absence_mocks::mocks::{create_absence_mocks_with, AbsenceMockOptions};
/// use absence_mocks::random::SeededRandom;
///
/// let options = AbsenceMockOptions { count: 5, ..Default::default() };
/// let first = create_absence_mocks_with(&mut SeededRandom::new(1), &MockConfig::default(), &options).unwrap();
/// let again = create_absence_mocks_with(&mut SeededRandom::new(1), &MockConfig::default(), &options).unwrap();
/// assert_eq!(first, again);
/// ```
pub fn create_absence_mocks_with(
    rng: &mut dyn RandomSource,
    config: &MockConfig,
    options: &AbsenceMockOptions,
) -> MockResult<Vec<Absence>> {
    config.validate()?;

    let (from, to) = options
        .date_since_between
        .unwrap_or(config.date_since_between);
    if from > to {
        return Err(MockError::InvalidDateRange { from, to });
    }

    let date_count = options
        .count
        .checked_mul(2)
        .ok_or(MockError::CountTooLarge {
            count: options.count,
        })?;

    debug!(count = options.count, from = %from, to = %to, "Generating absence mocks");

    let raw_dates = generate_random_dates(
        rng,
        &RandomDatesOptions {
            count: date_count,
            between: (from, to),
            max_duplicates: config.max_duplicates,
        },
    )?;

    let absences: Vec<Absence> = to_pairs(raw_dates)?
        .into_iter()
        .enumerate()
        .map(|(index, (pair_from, pair_to))| {
            create_absence(rng, config, index, pair_from, pair_to)
        })
        .collect::<MockResult<_>>()?;

    debug!(generated = absences.len(), "Generated absence mocks");
    Ok(absences)
}

/// Builds the absence at position `index` from its date pair.
fn create_absence(
    rng: &mut dyn RandomSource,
    config: &MockConfig,
    index: usize,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> MockResult<Absence> {
    let p = &config.probabilities;
    let is_overtime_reduction = rng.boolean(p.overtime_reduction);
    let is_sick = !is_overtime_reduction && rng.boolean(p.sick);
    let is_half_day = !is_overtime_reduction && rng.boolean(p.half_day);
    let has_note = rng.boolean(p.note);

    let date_since = start_of_day(rng.date_time_between(from, to));

    let date_until = if is_half_day {
        date_since
    } else {
        let offset = rng.int_in_range(config.span_days.min, config.span_days.max);
        // never past the pair's bound or into the next year
        let limit = to.min(end_of_year(date_since));
        let capped = match shift_days(date_since, offset) {
            Some(proposed) if proposed <= limit => proposed,
            _ => {
                trace!(index, offset, "Clamped absence end date");
                limit
            }
        };
        capped.max(date_since)
    };

    let status = if rng.boolean(p.forced_approval) {
        AbsenceStatus::Approved
    } else {
        pick(rng, &AbsenceStatus::ALL)
            .copied()
            .unwrap_or(AbsenceStatus::Requested)
    };

    let lead_days = rng.int_in_range(config.enquiry_lead_days.min, config.enquiry_lead_days.max);
    let date_enquired = shift_days(date_since, -lead_days).unwrap_or(NaiveDateTime::MIN);

    let note = if has_note {
        let word_count = rng.int_in_range(
            config.note_words.min as i64,
            config.note_words.max as i64,
        );
        Some(rng.words(word_count as usize))
    } else {
        None
    };

    let stored_date_enquired = if rng.boolean(p.missing_date_enquired) {
        None
    } else {
        Some(iso_date_from_date_time(date_enquired))
    };

    let (date_approved, approved_by) = if status == AbsenceStatus::Approved {
        let delay = rng.int_in_range(
            config.approval_delay_days.min,
            config.approval_delay_days.max,
        );
        (
            Some(iso_date_from_date_time(
                shift_days(date_enquired, delay).unwrap_or(NaiveDateTime::MAX),
            )),
            Some(config.approver_id),
        )
    } else {
        (None, None)
    };

    let details = if is_overtime_reduction {
        AbsenceDetails::ReductionOfOvertime {
            count_hours: draw_overtime_hours(rng, config)?,
        }
    } else {
        let count_days = if is_half_day {
            Decimal::new(5, 1)
        } else {
            let span_days = Decimal::from((date_until - date_since).num_minutes())
                / Decimal::from(ONE_DAY.num_minutes());
            let discount = rng.int_in_range(
                config.count_days_discount.min,
                config.count_days_discount.max,
            );
            (span_days - Decimal::from(discount))
                .round_dp(2)
                .max(Decimal::ONE)
        };

        if is_sick {
            let absence_type = if rng.boolean(p.sick_day_of_child) {
                AbsenceType::SickDayOfChild
            } else {
                AbsenceType::SickDay
            };
            AbsenceDetails::Sick {
                absence_type,
                count_days,
                sick_note: rng.boolean(p.sick_note),
            }
        } else {
            AbsenceDetails::Plain {
                absence_type: AbsenceType::PLAIN[index % AbsenceType::PLAIN.len()],
                count_days,
            }
        }
    };

    let absence = Absence {
        id: index as u64,
        users_id: config.users_id,
        date_since: iso_date_from_date_time(date_since),
        date_until: iso_date_from_date_time(date_until),
        status,
        note,
        date_enquired: stored_date_enquired,
        date_approved,
        approved_by,
        details,
    };

    trace!(
        id = absence.id,
        absence_type = %absence.absence_type(),
        status = %absence.status,
        "Generated absence"
    );

    Ok(absence)
}

/// Draws an overtime reduction in hours, rounded to two decimal places.
fn draw_overtime_hours(rng: &mut dyn RandomSource, config: &MockConfig) -> MockResult<Decimal> {
    let bounds = config.overtime_hours;
    let hours = rng.float_in_range(bounds.min, bounds.max);
    let hours = Decimal::from_f64(hours).ok_or_else(|| MockError::InvalidRange {
        name: "overtime_hours".to_string(),
        min: bounds.min,
        max: bounds.max,
    })?;
    // rounding must not produce a zero-hour reduction
    Ok(hours.round_dp(2).max(Decimal::new(1, 2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Bounds, MAX_OVERTIME_HOURS, MAX_RANGE_DAYS};
    use crate::random::SeededRandom;
    use chrono::{Datelike, NaiveDate};
    use std::collections::HashSet;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn generate(seed: u64, count: usize) -> Vec<Absence> {
        let options = AbsenceMockOptions {
            count,
            ..Default::default()
        };
        create_absence_mocks_with(&mut SeededRandom::new(seed), &MockConfig::default(), &options)
            .unwrap()
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate(1, 0).is_empty());
    }

    #[test]
    fn test_default_options_generate_one() {
        let absences = create_absence_mocks(&AbsenceMockOptions::default()).unwrap();
        assert_eq!(absences.len(), 1);
        assert_eq!(absences[0].id, 0);
    }

    #[test]
    fn test_ids_follow_positions() {
        let absences = generate(2, 50);
        assert_eq!(absences.len(), 50);
        for (i, absence) in absences.iter().enumerate() {
            assert_eq!(absence.id, i as u64);
        }
    }

    #[test]
    fn test_every_record_satisfies_invariants() {
        for absence in generate(3, 2_000) {
            if let Err(err) = absence.check_invariants() {
                panic!("{}: {:?}", err, absence);
            }
        }
    }

    #[test]
    fn test_dates_stay_in_default_window_year() {
        for absence in generate(4, 500) {
            let since = make_date(&absence.date_since);
            let until = make_date(&absence.date_until);
            assert!(since <= until);
            assert_eq!(since.year(), 2020);
            assert_eq!(until.year(), 2020);
        }
    }

    #[test]
    fn test_count_fields_match_type() {
        for absence in generate(5, 1_000) {
            match absence.absence_type() {
                AbsenceType::ReductionOfOvertime => {
                    let hours = absence.count_hours().unwrap();
                    assert!(hours >= Decimal::new(1, 1) && hours <= Decimal::new(8, 0));
                    assert!(absence.count_days().is_none());
                }
                _ => {
                    assert!(absence.count_days().is_some());
                    assert!(absence.count_hours().is_none());
                }
            }
        }
    }

    #[test]
    fn test_sick_types_carry_sick_note() {
        let absences = generate(6, 1_000);
        let sick: Vec<&Absence> = absences
            .iter()
            .filter(|a| a.absence_type().is_sick())
            .collect();
        assert!(!sick.is_empty());
        assert!(sick.iter().all(|a| a.sick_note().is_some()));
        assert!(
            absences
                .iter()
                .filter(|a| !a.absence_type().is_sick())
                .all(|a| a.sick_note().is_none())
        );
    }

    #[test]
    fn test_approval_fields_only_when_approved() {
        for absence in generate(7, 1_000) {
            let approved = absence.status == AbsenceStatus::Approved;
            assert_eq!(absence.date_approved.is_some(), approved);
            assert_eq!(absence.approved_by, approved.then_some(1));
        }
    }

    #[test]
    fn test_half_days_are_single_day() {
        for absence in generate(8, 1_000) {
            if absence.count_days() == Some(Decimal::new(5, 1)) {
                assert_eq!(absence.date_since, absence.date_until);
            }
        }
    }

    #[test]
    fn test_plain_types_cycle_by_index() {
        for absence in generate(9, 300) {
            if let AbsenceDetails::Plain { absence_type, .. } = absence.details {
                let expected = AbsenceType::PLAIN[absence.id as usize % AbsenceType::PLAIN.len()];
                assert_eq!(absence_type, expected);
            }
        }
    }

    #[test]
    fn test_plain_batch_covers_every_plain_type() {
        let mut config = MockConfig::default();
        config.probabilities.overtime_reduction = 0.0;
        config.probabilities.sick = 0.0;
        let options = AbsenceMockOptions {
            count: AbsenceType::PLAIN.len(),
            ..Default::default()
        };
        let absences =
            create_absence_mocks_with(&mut SeededRandom::new(10), &config, &options).unwrap();
        let seen: HashSet<AbsenceType> = absences.iter().map(|a| a.absence_type()).collect();
        assert_eq!(seen.len(), AbsenceType::PLAIN.len());
    }

    #[test]
    fn test_single_instant_window_gives_single_day_absences() {
        let instant = make_datetime("2020-06-15", "00:00:00");
        let options = AbsenceMockOptions {
            count: 200,
            date_since_between: Some((instant, instant)),
        };
        let absences =
            create_absence_mocks_with(&mut SeededRandom::new(11), &MockConfig::default(), &options)
                .unwrap();
        for absence in absences {
            assert_eq!(absence.date_since, "2020-06-15");
            assert_eq!(absence.date_until, "2020-06-15");
        }
    }

    #[test]
    fn test_end_of_year_clamps_until() {
        let from = make_datetime("2020-12-30", "00:00:00");
        let to = make_datetime("2021-01-01", "00:00:00");
        let mut config = MockConfig::default();
        config.span_days = Bounds::new(30, 30);
        config.probabilities.half_day = 0.0;
        let options = AbsenceMockOptions {
            count: 100,
            date_since_between: Some((from, to)),
        };
        let absences = create_absence_mocks_with(&mut SeededRandom::new(12), &config, &options)
            .unwrap();
        for absence in absences {
            let since = make_date(&absence.date_since);
            let until = make_date(&absence.date_until);
            assert_eq!(since.year(), until.year(), "{:?}", absence);
            assert!(until <= make_date("2020-12-31") || since == until);
        }
    }

    #[test]
    fn test_window_at_earliest_representable_date() {
        let earliest = start_of_day(NaiveDateTime::MIN);
        let mut config = MockConfig::default();
        config.probabilities.forced_approval = 1.0;
        config.probabilities.missing_date_enquired = 0.0;
        let options = AbsenceMockOptions {
            count: 50,
            date_since_between: Some((earliest, earliest)),
        };
        let absences =
            create_absence_mocks_with(&mut SeededRandom::new(17), &config, &options).unwrap();

        assert_eq!(absences.len(), 50);
        let first_day = iso_date_from_date_time(earliest);
        for absence in absences {
            assert_eq!(absence.date_since, first_day);
            assert_eq!(absence.date_until, first_day);
            // the enquiry date saturates instead of leaving the calendar
            assert_eq!(absence.date_enquired.as_deref(), Some(first_day.as_str()));
        }
    }

    #[test]
    fn test_window_at_latest_representable_date() {
        let to = NaiveDateTime::MAX;
        let from = shift_days(to, -2).unwrap();
        let mut config = MockConfig::default();
        config.probabilities.half_day = 0.0;
        config.span_days = Bounds::new(MAX_RANGE_DAYS, MAX_RANGE_DAYS);
        let options = AbsenceMockOptions {
            count: 50,
            date_since_between: Some((from, to)),
        };
        let absences =
            create_absence_mocks_with(&mut SeededRandom::new(18), &config, &options).unwrap();

        assert_eq!(absences.len(), 50);
        let last_day = iso_date_from_date_time(to);
        for absence in absences {
            assert!(absence.date_since <= absence.date_until);
            assert_eq!(absence.date_until, last_day);
        }
    }

    #[test]
    fn test_count_too_large_returns_error() {
        let options = AbsenceMockOptions {
            count: usize::MAX / 2 + 1,
            ..Default::default()
        };
        match create_absence_mocks_with(&mut SeededRandom::new(19), &MockConfig::default(), &options)
        {
            Err(MockError::CountTooLarge { count }) => assert_eq!(count, options.count),
            other => panic!("Expected CountTooLarge error, got {:?}", other),
        }
    }

    #[test]
    fn test_overtime_hours_stay_within_configured_bounds() {
        let mut config = MockConfig::default();
        config.probabilities.overtime_reduction = 1.0;
        config.overtime_hours = Bounds::new(2.0, MAX_OVERTIME_HOURS);
        let options = AbsenceMockOptions {
            count: 300,
            ..Default::default()
        };
        let absences =
            create_absence_mocks_with(&mut SeededRandom::new(20), &config, &options).unwrap();
        for absence in absences {
            let hours = absence.count_hours().unwrap();
            assert!(hours >= Decimal::from(2) && hours <= Decimal::from(24), "{hours}");
        }
    }

    #[test]
    fn test_forced_approval_approves_everything() {
        let mut config = MockConfig::default();
        config.probabilities.forced_approval = 1.0;
        config.approver_id = 99;
        let options = AbsenceMockOptions {
            count: 50,
            ..Default::default()
        };
        let absences =
            create_absence_mocks_with(&mut SeededRandom::new(13), &config, &options).unwrap();
        assert!(absences.iter().all(|a| a.is_approved()));
        assert!(absences.iter().all(|a| a.approved_by == Some(99)));
    }

    #[test]
    fn test_notes_respect_word_bounds() {
        let mut config = MockConfig::default();
        config.probabilities.note = 1.0;
        let options = AbsenceMockOptions {
            count: 200,
            ..Default::default()
        };
        let absences =
            create_absence_mocks_with(&mut SeededRandom::new(14), &config, &options).unwrap();
        for absence in absences {
            let words = absence.note.unwrap().split(' ').count();
            assert!((2..=10).contains(&words));
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        assert_eq!(generate(15, 100), generate(15, 100));
    }

    #[test]
    fn test_reversed_window_returns_error() {
        let options = AbsenceMockOptions {
            count: 3,
            date_since_between: Some((
                make_datetime("2021-01-01", "00:00:00"),
                make_datetime("2020-01-01", "00:00:00"),
            )),
        };
        match create_absence_mocks(&options) {
            Err(MockError::InvalidDateRange { from, to }) => {
                assert!(from > to);
            }
            other => panic!("Expected InvalidDateRange error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_returns_error() {
        let mut config = MockConfig::default();
        config.probabilities.sick = -0.1;
        let result = create_absence_mocks_with(
            &mut SeededRandom::new(16),
            &config,
            &AbsenceMockOptions::default(),
        );
        assert!(matches!(result, Err(MockError::InvalidProbability { .. })));
    }
}
