//! Live games: the per-room state machine, its redacted views and the
//! registry that owns one session per room.

pub mod game;
pub mod registry;
pub mod snapshot;

pub use game::{GameSession, SessionStatus};
pub use registry::SessionRegistry;
pub use snapshot::{Broadcast, PlayerView, SessionSnapshot};
