//! Uniform random piece generation
//!
//! Every spawn picks one of the 7 piece types with equal probability. The
//! PRNG is seedable so a game can be replayed piece for piece.

use crate::tetromino::PieceType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform piece randomizer
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: u64,
    rng: ChaCha8Rng,
}

impl PieceGenerator {
    /// Create a generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pick the next piece
    pub fn next(&mut self) -> PieceType {
        PieceType::ALL[self.rng.gen_range(0..PieceType::ALL.len())]
    }
}
