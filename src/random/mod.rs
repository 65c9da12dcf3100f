//! Random-value provider used by the mock generators.
//!
//! Every random draw the generators make goes through the [`RandomSource`]
//! trait, so tests can inject a seeded source and get reproducible batches.
//!
//! # Example
//!
//! ```
//! use absence_mocks::random::{RandomSource, SeededRandom};
//!
//! let mut rng = SeededRandom::new(42);
//! let roll = rng.int_in_range(1, 6);
//! assert!((1..=6).contains(&roll));
//! ```

mod lorem;
mod sources;

use chrono::{Duration, NaiveDateTime};

pub use lorem::LOREM_WORDS;
pub use sources::{SeededRandom, ThreadRandom};

/// Abstraction over the random primitives the generators need.
///
/// Implementors only provide the three numeric primitives; picking,
/// date sampling and lorem phrases are built on top of them.
pub trait RandomSource {
    /// Returns `true` with the given probability (clamped to `[0, 1]`).
    fn boolean(&mut self, probability: f64) -> bool;

    /// Returns an integer in `[min, max]`, both ends inclusive.
    ///
    /// Returns `min` when `min >= max`.
    fn int_in_range(&mut self, min: i64, max: i64) -> i64;

    /// Returns a float in `[min, max)`.
    ///
    /// Returns `min` when `min >= max`.
    fn float_in_range(&mut self, min: f64, max: f64) -> f64;

    /// Returns an index in `[0, len)`, or `0` for an empty or single-element list.
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.int_in_range(0, len as i64 - 1) as usize
    }

    /// Returns a date-time in `[from, to]` at millisecond resolution.
    ///
    /// Returns `from` when `to` is not after `from`.
    fn date_time_between(&mut self, from: NaiveDateTime, to: NaiveDateTime) -> NaiveDateTime {
        let span = (to - from).num_milliseconds();
        if span <= 0 {
            return from;
        }
        let offset = Duration::milliseconds(self.int_in_range(0, span));
        from.checked_add_signed(offset).unwrap_or(to)
    }

    /// Returns a phrase of `count` lorem words separated by single spaces.
    fn words(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| LOREM_WORDS[self.index(LOREM_WORDS.len())])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Picks one element of `items` uniformly, or `None` when it is empty.
///
/// # Example
///
/// ```
/// use absence_mocks::random::{pick, SeededRandom};
///
/// let mut rng = SeededRandom::new(7);
/// let colours = ["red", "green", "blue"];
/// assert!(colours.contains(pick(&mut rng, &colours).unwrap()));
///
/// let empty: [u8; 0] = [];
/// assert!(pick(&mut rng, &empty).is_none());
/// ```
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len()))
}
