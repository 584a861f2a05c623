//! Win-hand validation.
//!
//! A hand wins when every non-wildcard tile can be placed in a group of at
//! least three: a run (one colour, consecutive numbers, 13 → 1 wraps) or a
//! set (one number, distinct colours). Wildcards fill any position.
//!
//! ## Search
//!
//! The fixed tiles are sorted by (colour, number) once. Each step takes the
//! first remaining tile as the anchor, which must belong to some group, and
//! tries every group length `L` from 3 upward and, for each length, the
//! shapes in [`GroupShape::SEARCH_ORDER`]. A shape that fits removes its
//! tiles and the search recurses on the rest; a failed recursion moves on to
//! the next `(L, shape)` pair. The first full partition wins.
//!
//! Positions a remaining tile can fill always take the tile; wildcards only
//! cover gaps. For sets every choice of colours is tried, since which
//! copies join the set decides what is left for later groups.
//!
//! Inputs are immutable per call, so validation is safe to run from any
//! number of threads at once.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::tiles::{predecessor, successor, Color, Tile};

/// Smallest legal group.
pub const MIN_GROUP_SIZE: usize = 3;

/// Hand size a declaration is judged on.
pub const WINNING_HAND_SIZE: usize = 14;

/// Group shapes tried for each anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupShape {
    /// Anchor, anchor+1, ... in the anchor's colour.
    ForwardRun,
    /// Anchor, anchor-1, ... in the anchor's colour.
    BackwardRun,
    /// Anchor's number in distinct colours.
    Set,
}

impl GroupShape {
    /// Order shapes are attempted in for every group length.
    pub const SEARCH_ORDER: [GroupShape; 3] =
        [GroupShape::ForwardRun, GroupShape::BackwardRun, GroupShape::Set];

    /// Every way this shape of length `len` can be built around `anchor`.
    fn placements(
        self,
        anchor: &Tile,
        others: &[Tile],
        wildcards: usize,
        len: usize,
    ) -> SmallVec<[Placement; 3]> {
        let mut out = SmallVec::new();
        match self {
            GroupShape::ForwardRun => {
                out.extend(place_run(anchor, others, wildcards, len, successor));
            }
            GroupShape::BackwardRun => {
                out.extend(place_run(anchor, others, wildcards, len, predecessor));
            }
            GroupShape::Set => place_sets(anchor, others, wildcards, len, &mut out),
        }
        out
    }
}

/// One way to build a group: which of the other tiles it takes and how many
/// wildcards are left afterwards.
#[derive(Clone, Debug)]
struct Placement {
    used: SmallVec<[usize; WINNING_HAND_SIZE]>,
    wildcards_left: usize,
}

fn place_run(
    anchor: &Tile,
    others: &[Tile],
    wildcards: usize,
    len: usize,
    step: fn(u8) -> u8,
) -> Option<Placement> {
    let mut used: SmallVec<[usize; WINNING_HAND_SIZE]> = SmallVec::new();
    let mut wildcards_left = wildcards;
    let mut number = anchor.number();

    for _ in 1..len {
        number = step(number);
        let found = (0..others.len()).find(|i| {
            let t = &others[*i];
            !used.contains(i) && t.color() == anchor.color() && t.number() == number
        });
        match found {
            Some(i) => used.push(i),
            None if wildcards_left > 0 => wildcards_left -= 1,
            None => return None,
        }
    }

    Some(Placement {
        used,
        wildcards_left,
    })
}

fn place_sets(
    anchor: &Tile,
    others: &[Tile],
    wildcards: usize,
    len: usize,
    out: &mut SmallVec<[Placement; 3]>,
) {
    // One candidate per other colour; same-face copies are interchangeable.
    let candidates: SmallVec<[usize; 3]> = Color::ALL
        .iter()
        .filter(|&&c| c != anchor.color())
        .filter_map(|&c| {
            others
                .iter()
                .position(|t| t.color() == c && t.number() == anchor.number())
        })
        .collect();

    let slots = len - 1;
    let take = slots.min(candidates.len());
    let gaps = slots - take;
    if gaps > wildcards {
        return;
    }

    for mask in 0u8..(1 << candidates.len()) {
        if mask.count_ones() as usize != take {
            continue;
        }
        let used = candidates
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, &i)| i)
            .collect();
        out.push(Placement {
            used,
            wildcards_left: wildcards - gaps,
        });
    }
}

/// A group found by the search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub shape: GroupShape,
    /// Non-wildcard tiles in the group, anchor first.
    pub tiles: Vec<Tile>,
    /// Positions filled by wildcards.
    pub wildcards: usize,
}

impl Group {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len() + self.wildcards
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decide whether `fixed` plus `wildcards` free wildcards can be grouped.
///
/// An empty `fixed` always succeeds, whatever wildcards are left over.
#[must_use]
pub fn can_partition(fixed: &[Tile], wildcards: usize) -> bool {
    find_partition(fixed, wildcards).is_some()
}

/// Like [`can_partition`], returning the groups found.
#[must_use]
pub fn find_partition(fixed: &[Tile], wildcards: usize) -> Option<Vec<Group>> {
    let mut sorted = fixed.to_vec();
    sorted.sort_by_key(|t| (t.color(), t.number()));

    let mut groups = Vec::new();
    search(&sorted, wildcards, &mut groups).then_some(groups)
}

/// `fixed` must be sorted; removing tiles keeps it sorted.
fn search(fixed: &[Tile], wildcards: usize, groups: &mut Vec<Group>) -> bool {
    let Some((anchor, others)) = fixed.split_first() else {
        return true;
    };
    // Remaining wildcards can complete a short tail.
    if fixed.len() + wildcards < MIN_GROUP_SIZE {
        return false;
    }

    for len in MIN_GROUP_SIZE..=fixed.len() + wildcards {
        for shape in GroupShape::SEARCH_ORDER {
            for placement in shape.placements(anchor, others, wildcards, len) {
                let mut tiles = Vec::with_capacity(placement.used.len() + 1);
                tiles.push(*anchor);
                tiles.extend(placement.used.iter().map(|&i| others[i]));

                let rest: Vec<Tile> = others
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !placement.used.contains(i))
                    .map(|(_, t)| *t)
                    .collect();

                groups.push(Group {
                    shape,
                    tiles,
                    wildcards: wildcards - placement.wildcards_left,
                });
                if search(&rest, placement.wildcards_left, groups) {
                    return true;
                }
                groups.pop();
            }
        }
    }

    false
}

/// Judges declared hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandValidator {
    hand_size: usize,
}

impl Default for HandValidator {
    fn default() -> Self {
        Self::new(WINNING_HAND_SIZE)
    }
}

impl HandValidator {
    #[must_use]
    pub const fn new(hand_size: usize) -> Self {
        Self { hand_size }
    }

    #[must_use]
    pub const fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Does `tiles` form a complete winning hand?
    ///
    /// Hands of the wrong size never win.
    #[must_use]
    pub fn is_winning_hand(&self, tiles: &[Tile]) -> bool {
        self.winning_groups(tiles).is_some()
    }

    /// The grouping that makes `tiles` a winning hand, if there is one.
    #[must_use]
    pub fn winning_groups(&self, tiles: &[Tile]) -> Option<Vec<Group>> {
        if tiles.len() != self.hand_size {
            return None;
        }

        let (wild, fixed): (Vec<Tile>, Vec<Tile>) =
            tiles.iter().copied().partition(|t| t.is_wildcard());
        debug!(
            fixed = fixed.len(),
            wildcards = wild.len(),
            "Searching hand partition"
        );

        find_partition(&fixed, wild.len())
    }
}
