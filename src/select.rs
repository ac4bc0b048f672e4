//! Random Selection
//!
//! Uniform random draws from an element index. The RNG is owned by the
//! selector and injected by the caller, so a seeded selector replays the
//! same sequence of choices.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::dom::ElementId;
use crate::error::{Error, Result};
use crate::index::ElementIndex;

/// Draws element handles uniformly at random from an index
#[derive(Debug, Clone)]
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Deterministic selector for a given seed
    pub fn seeded(seed: u64) -> Self {
        RandomSelector {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selector seeded from the system clock's nanoseconds
    ///
    /// Different runs draw different sequences; nothing is cryptographic here.
    pub fn from_clock() -> Self {
        Self::seeded(clock_seed())
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Wrap an existing RNG
    pub fn new(rng: R) -> Self {
        RandomSelector { rng }
    }

    /// Pick one handle from the index, uniformly
    ///
    /// An empty index is a caller bug (every document has a root) and is
    /// reported as `Error::EmptyIndex`.
    pub fn select(&mut self, index: &ElementIndex) -> Result<ElementId> {
        index
            .as_slice()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::EmptyIndex)
    }
}

/// Seed derived from the high-resolution system clock
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
