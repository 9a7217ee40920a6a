//! Injected randomness for glitch selection.
//!
//! The controller never calls a global RNG directly; selection goes through
//! [`RandomSource`] so tests can drive the full effect/jumpscare enumeration
//! deterministically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform index selection over a fixed-size set.
pub trait RandomSource: Send {
    /// A value in `0..len`. `len` is always one of the fixed set sizes (> 0).
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Default entropy-seeded source.
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
