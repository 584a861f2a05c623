//! # okey-engine
//!
//! Game engine for multiplayer Okey, the tile-rummy game played with a
//! double set of numbered tiles and an indicator-selected joker.
//!
//! ## Design Principles
//!
//! 1. **Authoritative**: The session is the single source of truth. Every
//!    move is validated in full before any state changes.
//!
//! 2. **Deterministic**: Given the same tile order, dealing and play always
//!    produce the same table. Shuffles come from seeded ChaCha streams.
//!
//! 3. **Transport-Agnostic**: The engine consumes room and player ids and
//!    returns serializable snapshots. Sockets and lobbies live elsewhere.
//!
//! ## Modules
//!
//! - `core`: Identifiers, players, RNG, configuration, moves, errors
//! - `tiles`: Tiles, piles, and building, shuffling and dealing a set
//! - `rules`: Win-hand validation
//! - `session`: Turn state machine, redacted views, session registry
//!
//! ## Example
//!
//! ```
//! use okey_engine::{EngineConfig, PileKind, PlayerId, PlayerInfo, RoomId, SessionRegistry};
//!
//! let registry = SessionRegistry::new(EngineConfig::default().with_seed(1)).unwrap();
//! let room = RoomId::new("table-1");
//! registry
//!     .create_session(room.clone(), vec![PlayerInfo::new("a", "Ada"), PlayerInfo::new("b", "Bo")])
//!     .unwrap();
//!
//! let a = PlayerId::new("a");
//! let update = registry.draw_tile(&room, &a, PileKind::Draw).unwrap();
//! let view = update.for_player(&a).unwrap();
//! assert_eq!(view.player(&a).unwrap().hand_size, 15);
//! ```

pub mod core;
pub mod rules;
pub mod session;
pub mod tiles;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, EngineError, ErrorKind, GameRng, Move, MoveRecord, Player, PlayerId, PlayerInfo,
    PlayerMap, RoomId, Seat,
};

pub use crate::tiles::{Color, Indicator, Joker, Pile, PileKind, Tile, TileId};

pub use crate::rules::{can_partition, Group, GroupShape, HandValidator};

pub use crate::session::{
    Broadcast, GameSession, PlayerView, SessionRegistry, SessionSnapshot, SessionStatus,
};
