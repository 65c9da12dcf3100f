//! Concrete [`RandomSource`] implementations backed by `rand`.

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::RandomSource;

fn boolean<R: Rng>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

fn int_in_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

fn float_in_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..max)
}

/// Random source backed by the ambient thread-local RNG.
///
/// This is what [`crate::mocks::create_absence_mocks`] uses; output is not
/// reproducible.
#[derive(Debug, Clone, Default)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    /// Creates a source drawing from `rand::thread_rng()`.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomSource for ThreadRandom {
    fn boolean(&mut self, probability: f64) -> bool {
        boolean(&mut self.rng, probability)
    }

    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        int_in_range(&mut self.rng, min, max)
    }

    fn float_in_range(&mut self, min: f64, max: f64) -> f64 {
        float_in_range(&mut self.rng, min, max)
    }
}

/// Deterministic random source for reproducible batches.
///
/// Uses ChaCha8 so the same seed yields the same sequence on every platform.
///
/// # Example
///
/// ```
/// use absence_mocks::random::{RandomSource, SeededRandom};
///
/// let mut a = SeededRandom::new(99);
/// let mut b = SeededRandom::new(99);
/// assert_eq!(a.int_in_range(0, 1_000_000), b.int_in_range(0, 1_000_000));
/// ```
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns the seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn boolean(&mut self, probability: f64) -> bool {
        boolean(&mut self.rng, probability)
    }

    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        int_in_range(&mut self.rng, min, max)
    }

    fn float_in_range(&mut self, min: f64, max: f64) -> f64 {
        float_in_range(&mut self.rng, min, max)
    }
}
