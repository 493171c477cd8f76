//! Seedable randomness for shuffles, starting players and identities.
//!
//! Every room owns its own stream. A table started with a fixed seed replays
//! identically, which keeps the engine testable without ambient randomness.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use uno_duel_types::{PlayerId, Suit};

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha20Rng,
}

impl GameRng {
    /// Deterministic stream derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Stream seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha20Rng::from_entropy(),
        }
    }

    /// Derives an independent child stream (one per room).
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.inner.next_u64())
    }

    /// Uniform in-place permutation (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    pub fn suit(&mut self) -> Suit {
        Suit::ALL[self.index(Suit::ALL.len())]
    }

    pub fn player_id(&mut self) -> PlayerId {
        PlayerId::from_random_bytes(self.inner.gen())
    }
}
