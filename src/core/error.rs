//! Engine error type.
//!
//! Every engine operation either succeeds or fails with exactly one
//! `EngineError`. Checks run before any mutation, so a failed call leaves
//! the session untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use super::room::RoomId;
use crate::tiles::{PileKind, TileId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no game session for room {0}")]
    SessionNotFound(RoomId),

    #[error("player {0} is not seated in this game")]
    PlayerNotFound(PlayerId),

    #[error("it is not {0}'s turn")]
    NotPlayersTurn(PlayerId),

    #[error("{0} already drew this turn")]
    AlreadyDrawn(PlayerId),

    #[error("{0} must draw before discarding")]
    MustDrawBeforeDiscard(PlayerId),

    #[error("{0} already discarded this turn")]
    AlreadyDiscarded(PlayerId),

    #[error("tile {tile} is not in {player}'s hand")]
    TileNotInHand { player: PlayerId, tile: TileId },

    #[error("the {0} is empty")]
    PileEmpty(PileKind),

    #[error("a winning hand needs {expected} tiles, got {actual}")]
    InvalidHandSize { expected: usize, actual: usize },

    #[error("{0}'s hand does not split into runs and sets")]
    InvalidPartition(PlayerId),

    #[error("the game in room {0} is already finished")]
    SessionFinished(RoomId),

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("not a complete tile set: {0}")]
    InvalidTileSet(String),
}

/// Wire-level discriminant of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    SessionNotFound,
    PlayerNotFound,
    NotPlayersTurn,
    AlreadyDrawn,
    MustDrawBeforeDiscard,
    AlreadyDiscarded,
    TileNotInHand,
    PileEmpty,
    InvalidHandSize,
    InvalidPartition,
    SessionFinished,
    InvalidRoster,
    InvalidTileSet,
}

impl EngineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::SessionNotFound(_) => ErrorKind::SessionNotFound,
            EngineError::PlayerNotFound(_) => ErrorKind::PlayerNotFound,
            EngineError::NotPlayersTurn(_) => ErrorKind::NotPlayersTurn,
            EngineError::AlreadyDrawn(_) => ErrorKind::AlreadyDrawn,
            EngineError::MustDrawBeforeDiscard(_) => ErrorKind::MustDrawBeforeDiscard,
            EngineError::AlreadyDiscarded(_) => ErrorKind::AlreadyDiscarded,
            EngineError::TileNotInHand { .. } => ErrorKind::TileNotInHand,
            EngineError::PileEmpty(_) => ErrorKind::PileEmpty,
            EngineError::InvalidHandSize { .. } => ErrorKind::InvalidHandSize,
            EngineError::InvalidPartition(_) => ErrorKind::InvalidPartition,
            EngineError::SessionFinished(_) => ErrorKind::SessionFinished,
            EngineError::InvalidRoster(_) => ErrorKind::InvalidRoster,
            EngineError::InvalidTileSet(_) => ErrorKind::InvalidTileSet,
        }
    }
}
