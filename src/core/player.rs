//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Opaque identity handed to the engine by the lobby layer (a socket id,
//! a user id, anything string-shaped). The engine never interprets it.
//!
//! ## Seat
//!
//! Position in the fixed turn order of one session, 0-based.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//!
//! ## Player
//!
//! Mutable per-session state: hand, score and the per-turn flags that drive
//! the draw/discard state machine.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::tiles::{Tile, TileId};

/// Opaque player identity supplied by the lobby layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Seat index in a session's turn order.
///
/// Seats are 0-based: the first player to act is `Seat(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one, wrapping around the table.
    #[must_use]
    pub const fn next(self, player_count: usize) -> Self {
        Self(((self.0 as usize + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a table of `player_count` players.
    ///
    /// ```
    /// use okey_engine::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[0], Seat::new(0));
    /// assert_eq!(seats[3], Seat::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = Seat> {
        (0..player_count as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat, in turn order.
///
/// ## Example
///
/// ```
/// use okey_engine::core::{PlayerMap, Seat};
///
/// let mut hand_sizes = PlayerMap::from_vec(vec![14u32; 4]);
/// hand_sizes[Seat::new(1)] += 1;
///
/// assert_eq!(hand_sizes[Seat::new(1)], 15);
/// assert_eq!(hand_sizes.position(|&n| n == 15), Some(Seat::new(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Wrap values already in seat order.
    ///
    /// Rosters are validated before they get here, so the seat count is
    /// only checked in debug builds.
    pub fn from_vec(data: Vec<T>) -> Self {
        debug_assert!(!data.is_empty(), "a table needs at least one seat");
        debug_assert!(data.len() <= usize::from(u8::MAX), "too many seats");
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over (Seat, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over values in turn order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Find the first seat whose value satisfies `predicate`.
    pub fn position(&self, predicate: impl Fn(&T) -> bool) -> Option<Seat> {
        self.data.iter().position(predicate).map(|i| Seat(i as u8))
    }
}

impl<T> Index<Seat> for PlayerMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for PlayerMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

/// Roster entry handed over by the lobby when a game starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub display_name: String,
}

impl PlayerInfo {
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            display_name: display_name.into(),
        }
    }
}

/// Per-session player state.
///
/// The hand holds 14 tiles between turns and 15 transiently after a draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    hand: Vec<Tile>,
    /// Not updated by the engine; carried for the lobby's scoreboard.
    pub score: i64,
    pub has_drawn_this_turn: bool,
    pub has_discarded_this_turn: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(info: PlayerInfo) -> Self {
        Self {
            id: info.id,
            display_name: info.display_name,
            hand: Vec::new(),
            score: 0,
            has_drawn_this_turn: false,
            has_discarded_this_turn: false,
        }
    }

    /// The player's tiles, in hand order.
    #[must_use]
    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Replace the whole hand.
    pub fn set_hand(&mut self, hand: Vec<Tile>) {
        self.hand = hand;
    }

    /// Append a tile to the end of the hand.
    pub fn add_tile(&mut self, tile: Tile) {
        self.hand.push(tile);
    }

    /// Look up a tile in the hand by id.
    #[must_use]
    pub fn tile(&self, tile_id: TileId) -> Option<&Tile> {
        self.hand.iter().find(|t| t.id() == tile_id)
    }

    #[must_use]
    pub fn has_tile(&self, tile_id: TileId) -> bool {
        self.tile(tile_id).is_some()
    }

    /// Remove a tile from the hand.
    ///
    /// Returns the removed tile, or `None` if it was not held.
    pub fn remove_tile(&mut self, tile_id: TileId) -> Option<Tile> {
        let pos = self.hand.iter().position(|t| t.id() == tile_id)?;
        Some(self.hand.remove(pos))
    }

    /// The hand with one tile left out, order preserved.
    #[must_use]
    pub fn hand_without(&self, tile_id: TileId) -> Vec<Tile> {
        self.hand
            .iter()
            .filter(|t| t.id() != tile_id)
            .copied()
            .collect()
    }

    /// Clear the per-turn flags at the start of this player's turn.
    pub fn reset_turn(&mut self) {
        self.has_drawn_this_turn = false;
        self.has_discarded_this_turn = false;
    }
}
