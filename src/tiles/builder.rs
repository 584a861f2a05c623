//! Tile set construction and table layout.
//!
//! The steps run in this order when a game starts:
//!
//! 1. [`build_set`] - the 104 plain tiles in canonical order
//! 2. [`shuffle`] - a uniformly random permutation
//! 3. [`derive_indicator`] - the last tile is revealed as the indicator
//! 4. [`mark_wildcards`] - the two tiles matching the joker become wildcards
//! 5. [`deal`] - round-robin hands, the rest becomes the draw pile
//! 6. [`sort_for_display`] - each hand is ordered for presentation
//!
//! [`lay_out`] runs steps 3-6 on an already shuffled set.

use super::pile::{Pile, PileKind};
use super::tile::{Color, Indicator, Joker, Tile, TileId, MAX_NUMBER, MIN_NUMBER};
use crate::core::{EngineError, GameRng};

/// Physical copies of every (colour, number) face.
pub const COPIES_PER_FACE: usize = 2;

/// Tiles in a fresh set: 2 copies × 4 colours × 13 numbers.
pub const FULL_SET_SIZE: usize = COPIES_PER_FACE * Color::ALL.len() * MAX_NUMBER as usize;

/// Tiles left in play once the indicator is set aside.
pub const CIRCULATING_TILES: usize = FULL_SET_SIZE - 1;

/// Build the full double tile set.
///
/// Ids are assigned in order `tile_0..tile_103`: the first copy of every
/// face (red 1-13, black 1-13, blue 1-13, yellow 1-13), then the second.
#[must_use]
pub fn build_set() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(FULL_SET_SIZE);
    let mut next_id = 0u8;

    for _ in 0..COPIES_PER_FACE {
        for color in Color::ALL {
            for number in MIN_NUMBER..=MAX_NUMBER {
                tiles.push(Tile::new(TileId::new(next_id), color, number));
                next_id += 1;
            }
        }
    }

    tiles
}

/// Uniformly shuffled copy of `tiles` (Fisher–Yates). The input is untouched.
#[must_use]
pub fn shuffle(tiles: &[Tile], rng: &mut GameRng) -> Vec<Tile> {
    rng.shuffled(tiles)
}

/// Remove the last tile as the indicator and derive the joker from it.
///
/// Fails only when `tiles` is empty.
pub fn derive_indicator(mut tiles: Vec<Tile>) -> Result<(Indicator, Vec<Tile>), EngineError> {
    let tile = tiles.pop().ok_or(EngineError::PileEmpty(PileKind::Draw))?;
    Ok((Indicator::new(tile), tiles))
}

/// Flag every tile with the joker's face as a wildcard.
///
/// Ids and order are preserved; matching tiles are replaced by their
/// wildcard form.
#[must_use]
pub fn mark_wildcards(tiles: Vec<Tile>, joker: &Joker) -> Vec<Tile> {
    tiles
        .into_iter()
        .map(|tile| if joker.matches(&tile) { tile.as_wildcard() } else { tile })
        .collect()
}

/// Hands dealt to each seat plus the undealt remainder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    /// One hand per seat, in seat order.
    pub hands: Vec<Vec<Tile>>,
    /// Undealt tiles; the top is the pile's current end.
    pub draw_pile: Pile,
}

/// Deal `per_player` tiles to each of `player_count` seats.
///
/// Round-robin: each round gives one tile to every seat in order, always
/// taking from the end of `tiles`. Dealing stops early if the tiles run out.
#[must_use]
pub fn deal(mut tiles: Vec<Tile>, player_count: usize, per_player: usize) -> Deal {
    let mut hands: Vec<Vec<Tile>> = (0..player_count)
        .map(|_| Vec::with_capacity(per_player + 1))
        .collect();

    for _ in 0..per_player {
        for hand in hands.iter_mut() {
            if let Some(tile) = tiles.pop() {
                hand.push(tile);
            }
        }
    }

    Deal {
        hands,
        draw_pile: Pile::from_bottom_up(tiles),
    }
}

/// Order tiles for display: wildcards last, otherwise by colour then number.
pub fn sort_for_display(tiles: &mut [Tile]) {
    tiles.sort_by_key(|t| (t.is_wildcard(), t.color(), t.number()));
}

/// A table ready to play: indicator revealed, hands dealt and sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub indicator: Indicator,
    pub hands: Vec<Vec<Tile>>,
    pub draw_pile: Pile,
}

/// Run indicator derivation, wildcard marking, dealing and sorting on a
/// shuffled set.
pub fn lay_out(
    shuffled: Vec<Tile>,
    player_count: usize,
    per_player: usize,
) -> Result<Layout, EngineError> {
    let (indicator, remaining) = derive_indicator(shuffled)?;
    let marked = mark_wildcards(remaining, &indicator.joker);
    let Deal {
        mut hands,
        draw_pile,
    } = deal(marked, player_count, per_player);

    for hand in hands.iter_mut() {
        sort_for_display(hand);
    }

    Ok(Layout {
        indicator,
        hands,
        draw_pile,
    })
}
