//! Core engine types: identifiers, players, RNG, configuration, moves, errors.
//!
//! This module contains the building blocks shared by the tile, rules and
//! session layers.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod room;

pub use action::{Move, MoveRecord};
pub use config::EngineConfig;
pub use error::{EngineError, ErrorKind};
pub use player::{Player, PlayerId, PlayerInfo, PlayerMap, Seat};
pub use rng::GameRng;
pub use room::RoomId;
