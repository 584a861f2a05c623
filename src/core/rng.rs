//! Seeded shuffling.
//!
//! Every deal is driven by a [`GameRng`]. A registry holds one base stream
//! and derives a fresh one per game with [`GameRng::for_game`], so a fixed
//! seed replays the same deals in the same order, and a restarted room never
//! sees its previous deal again.
//!
//! ```
//! use okey_engine::core::{GameRng, RoomId};
//!
//! let base = GameRng::new(7);
//! let room = RoomId::new("table-3");
//! let deck: Vec<u8> = (0..106).collect();
//!
//! let first = base.for_game(&room, 1).shuffled(&deck);
//! let again = GameRng::new(7).for_game(&room, 1).shuffled(&deck);
//! let next = base.for_game(&room, 2).shuffled(&deck);
//!
//! assert_eq!(first, again);
//! assert_ne!(first, next);
//! ```

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::RoomId;

/// ChaCha8 stream remembering the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread-local generator. Used when no seed is configured.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a stream keyed by `label`, independent of how far `self` has
    /// advanced.
    #[must_use]
    pub fn for_context(&self, label: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        label.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Stream for the `game_no`th game started in `room`.
    #[must_use]
    pub fn for_game(&self, room: &RoomId, game_no: u64) -> Self {
        self.for_context(&format!("{room}#{game_no}"))
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Shuffled copy of `items`; the input keeps its order.
    #[must_use]
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle(&mut out);
        out
    }
}
