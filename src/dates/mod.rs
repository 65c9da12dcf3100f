//! Date helpers for building mock records.
//!
//! This module contains the day/year boundary utilities, the random date
//! sequence generator that feeds the pairing step, and the ISO calendar
//! date formatter used for every date field of a generated record.

mod format;
mod range;
mod sequence;

pub use format::iso_date_from_date_time;
pub use range::{ONE_DAY, end_of_year, shift_days, start_of_day, to_pairs};
pub use sequence::{RandomDatesOptions, generate_random_dates};
