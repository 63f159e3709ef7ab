//! Randomness for dealing the deck.
//!
//! ## Key Features
//!
//! - **Uniform**: Shuffling is a Fisher–Yates pass, every layout equally likely
//! - **Deterministic**: Same seed produces the identical layout
//! - **Pluggable**: The game only sees the [`Shuffler`] trait, so hosts and
//!   tests can substitute a fixed layout
//!
//! ```
//! use paw_match::core::GameRng;
//!
//! let mut a = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! let mut b = a.clone();
//!
//! GameRng::new(7).shuffle_cards(&mut a);
//! GameRng::new(7).shuffle_cards(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cards::Symbol;

/// Source of layout permutations for a fresh deck.
///
/// Implementations must produce a permutation of the input; the game
/// re-validates nothing after shuffling.
pub trait Shuffler {
    /// Permute the dealt symbols in place.
    fn shuffle_symbols(&mut self, symbols: &mut [Symbol]);
}

/// Seedable ChaCha8 RNG used for dealing.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: Option<u64>,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create an RNG seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Build from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    /// The seed this RNG was created with, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Shuffle any slice in place (Fisher–Yates).
    pub fn shuffle_cards<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

impl Shuffler for GameRng {
    fn shuffle_symbols(&mut self, symbols: &mut [Symbol]) {
        self.shuffle_cards(symbols);
    }
}

/// Keeps the deck in specification order.
///
/// Useful for tutorials and for tests that need a known layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unshuffled;

impl Shuffler for Unshuffled {
    fn shuffle_symbols(&mut self, _symbols: &mut [Symbol]) {}
}
