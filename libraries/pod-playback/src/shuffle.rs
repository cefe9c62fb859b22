//! Random index selection for shuffle mode
//!
//! Shuffle here does not reorder the queue. `play_next` asks an
//! `IndexPicker` for a uniformly random position, which may be the
//! current one again.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// Source of uniformly random queue positions
pub trait IndexPicker {
    /// Pick a position in `0..len`
    ///
    /// Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Picker backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngPicker;

impl IndexPicker for ThreadRngPicker {
    fn pick(&mut self, len: usize) -> usize {
        thread_rng().gen_range(0..len)
    }
}

/// Deterministic picker for reproducible sessions
#[derive(Debug, Clone)]
pub struct SeededPicker {
    rng: StdRng,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IndexPicker for SeededPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Picker matching the configured seed
pub(crate) fn picker_for(seed: Option<u64>) -> Box<dyn IndexPicker> {
    match seed {
        Some(seed) => Box::new(SeededPicker::new(seed)),
        None => Box::new(ThreadRngPicker),
    }
}
