//! Moves and the session's move history.
//!
//! A `Move` is what a player did; a `MoveRecord` adds who, from which seat,
//! and on which turn. Records are appended only for moves that succeeded.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, Seat};
use crate::tiles::{PileKind, TileId};

/// A successful player move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Move {
    /// Took the top tile of a pile. The tile itself stays private.
    Draw { source: PileKind },

    /// Put a tile from hand on top of the discard pile.
    Discard { tile: TileId },

    /// Ended the game with a valid hand, optionally discarding first.
    DeclareWin { discard: Option<TileId> },
}

/// A recorded move with metadata for history tracking.
///
/// Used for replay and debugging by the layers above the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Seat of the acting player.
    pub seat: Seat,

    /// The acting player.
    pub player: PlayerId,

    /// What they did.
    pub action: Move,

    /// Session turn counter when the move was made.
    pub turn: u32,
}

impl MoveRecord {
    #[must_use]
    pub fn new(seat: Seat, player: PlayerId, action: Move, turn: u32) -> Self {
        Self {
            seat,
            player,
            action,
            turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_equality() {
        let a = Move::Discard { tile: TileId::new(5) };
        let b = Move::Discard { tile: TileId::new(5) };
        let c = Move::Discard { tile: TileId::new(6) };

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Move::DeclareWin { discard: Some(TileId::new(5)) });
    }

    #[test]
    fn test_move_serialization() {
        let json = serde_json::to_string(&Move::Draw { source: PileKind::Discard }).unwrap();
        assert_eq!(json, r#"{"type":"draw","source":"discard"}"#);

        let json = serde_json::to_string(&Move::DeclareWin { discard: None }).unwrap();
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Move::DeclareWin { discard: None });
    }

    #[test]
    fn test_move_record_serialization() {
        let record = MoveRecord::new(
            Seat::new(2),
            PlayerId::new("p3"),
            Move::Discard { tile: TileId::new(40) },
            7,
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
