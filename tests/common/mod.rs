//! Shared helpers for integration tests.
//!
//! Arranged deals: [`arrange`] produces a tile order that, once dealt,
//! gives each seat exactly the hand asked for and puts chosen tiles on top
//! of the draw pile.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use okey_engine::tiles::build_set;
use okey_engine::{Color, PlayerInfo, Tile, TileId};

/// A tile face: colour and number.
pub type Face = (Color, u8);

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Players `p1..=pn` named `Player 1..n`.
pub fn roster(n: usize) -> Vec<PlayerInfo> {
    (1..=n)
        .map(|i| PlayerInfo::new(format!("p{i}"), format!("Player {i}")))
        .collect()
}

fn take(pool: &mut Vec<Tile>, (color, number): Face) -> Tile {
    let pos = pool
        .iter()
        .position(|t| t.color() == color && t.number() == number)
        .unwrap_or_else(|| panic!("no {color} {number} left in the set"));
    pool.remove(pos)
}

/// Build a full 104-tile order for `GameSession::from_shuffled`.
///
/// `hands[s]` is dealt to seat `s`; seats without an entry get the next 14
/// unused tiles. `draw_top[0]` ends up on top of the draw pile. Hand sizes
/// must equal `per_player`.
pub fn arrange(
    hands: &[Vec<Face>],
    player_count: usize,
    per_player: usize,
    draw_top: &[Face],
    indicator: Face,
) -> Vec<Tile> {
    let mut pool = build_set();
    let indicator = take(&mut pool, indicator);

    let mut dealt: Vec<Vec<Tile>> = hands
        .iter()
        .map(|faces| {
            assert_eq!(faces.len(), per_player, "arranged hand has the wrong size");
            faces.iter().map(|&f| take(&mut pool, f)).collect()
        })
        .collect();
    let top: Vec<Tile> = draw_top.iter().map(|&f| take(&mut pool, f)).collect();
    while dealt.len() < player_count {
        dealt.push(pool.drain(..per_player).collect());
    }

    let mut sequence = Vec::with_capacity(player_count * per_player);
    for round in 0..per_player {
        for hand in &dealt {
            sequence.push(hand[round]);
        }
    }

    let mut order = pool;
    order.extend(top.into_iter().rev());
    order.extend(sequence.into_iter().rev());
    order.push(indicator);
    order
}

/// Id of the first tile in `hand` with the given face.
pub fn find(hand: &[Tile], (color, number): Face) -> TileId {
    hand.iter()
        .find(|t| t.color() == color && t.number() == number)
        .map(|t| t.id())
        .unwrap_or_else(|| panic!("{color} {number} not in hand"))
}

/// Faces of a hand, sorted for comparison.
pub fn faces(hand: &[Tile]) -> Vec<Face> {
    let mut out: Vec<Face> = hand.iter().map(|t| (t.color(), t.number())).collect();
    out.sort();
    out
}

/// Red 1-4, black 5-7, blue 10-13 and an 8 in red, black and blue.
pub fn winning_faces() -> Vec<Face> {
    use Color::{Black, Blue, Red};
    vec![
        (Red, 1), (Red, 2), (Red, 3), (Red, 4),
        (Black, 5), (Black, 6), (Black, 7),
        (Blue, 10), (Blue, 11), (Blue, 12), (Blue, 13),
        (Red, 8), (Black, 8), (Blue, 8),
    ]
}

/// Fourteen tiles with no two in any group.
pub fn scattered_faces() -> Vec<Face> {
    use Color::{Black, Blue, Red, Yellow};
    vec![
        (Red, 1), (Red, 5), (Red, 9),
        (Black, 2), (Black, 6), (Black, 10),
        (Blue, 3), (Blue, 7), (Blue, 11),
        (Yellow, 4), (Yellow, 8), (Yellow, 12),
        (Red, 12), (Black, 13),
    ]
}
