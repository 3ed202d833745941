//! Deterministic random number generation for deck shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Serializable**: O(1) state capture and restore for snapshots
//! - **Uniform shuffles**: Fisher–Yates via `SliceRandom::shuffle`
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut deal_a = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! let mut deal_b = deal_a.clone();
//! a.shuffle(&mut deal_a);
//! b.shuffle(&mut deal_b);
//!
//! assert_eq!(deal_a, deal_b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG driving every deal of a game.
///
/// Uses ChaCha8 for speed while keeping good statistical quality, so that
/// every permutation of the board is equally likely.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Create from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place (Fisher–Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for snapshots.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many shuffles have been performed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
