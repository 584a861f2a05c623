//! LIFO tile piles.
//!
//! Both the draw pile and the discard pile are stacks: tiles are taken from
//! and put on the top only. Index 0 is the bottom, the last element the top.

use serde::{Deserialize, Serialize};

use super::tile::Tile;

/// Which of the two shared piles a draw comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PileKind {
    Draw,
    Discard,
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileKind::Draw => f.write_str("draw pile"),
            PileKind::Discard => f.write_str("discard pile"),
        }
    }
}

/// A stack of tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    /// Bottom first, top last.
    tiles: Vec<Tile>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pile from tiles listed bottom to top.
    #[must_use]
    pub fn from_bottom_up(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Put a tile on top.
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Take the top tile.
    pub fn pop(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Look at the top tile without taking it.
    #[must_use]
    pub fn top(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles, bottom to top.
    #[must_use]
    pub fn as_slice(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn into_vec(self) -> Vec<Tile> {
        self.tiles
    }
}
