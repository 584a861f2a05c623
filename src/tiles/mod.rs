//! Tiles, piles, and tile set construction.
//!
//! ## Key Types
//!
//! - `Tile`: immutable piece (id, colour, number, wildcard flag)
//! - `Indicator` / `Joker`: the revealed tile and the wildcard face it selects
//! - `Pile`: LIFO stack used for the draw and discard piles
//!
//! The builder functions construct, shuffle, and deal a fresh set.

pub mod builder;
pub mod pile;
pub mod tile;

pub use builder::{
    build_set, deal, derive_indicator, lay_out, mark_wildcards, shuffle, sort_for_display, Deal,
    Layout, CIRCULATING_TILES, COPIES_PER_FACE, FULL_SET_SIZE,
};
pub use pile::{Pile, PileKind};
pub use tile::{
    predecessor, successor, Color, Indicator, Joker, ParseTileIdError, Tile, TileId, MAX_NUMBER,
    MIN_NUMBER,
};
