use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of placement randomness. The virtual machine takes this as an
/// injected abstraction rather than a process-wide generator so that
/// battles replay deterministically under a scripted or seeded source.
pub trait RandomSource {
    /// Returns a value in `[min, max)`.
    fn next(&mut self, min: usize, max: usize) -> usize;
}

/// Production randomness backed by the `rand` crate.
pub struct CoreRandom {
    rng: StdRng,
}

impl CoreRandom {
    pub fn new() -> CoreRandom {
        CoreRandom {
            rng: StdRng::from_entropy(),
        }
    }

    /// A replayable source: the same seed yields the same placements.
    pub fn seeded(seed: u64) -> CoreRandom {
        CoreRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for CoreRandom {
    fn default() -> CoreRandom {
        CoreRandom::new()
    }
}

impl RandomSource for CoreRandom {
    fn next(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..max)
    }
}
