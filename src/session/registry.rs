//! Room-keyed store of live sessions.
//!
//! One session per room. The map is sharded ([`DashMap`]) and every
//! session sits behind its own mutex: an operation clones the room's handle
//! out of the map, lets go of the shard, then holds the room lock for its
//! whole check-then-mutate sequence. Moves in one room are serialised;
//! different rooms never wait on each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use super::game::GameSession;
use super::snapshot::{Broadcast, SessionSnapshot};
use crate::core::{EngineConfig, EngineError, GameRng, Move, PlayerId, PlayerInfo, RoomId};
use crate::tiles::{PileKind, TileId};

type SessionHandle = Arc<Mutex<GameSession>>;

/// All live sessions, shared by every caller.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<RoomId, SessionHandle>,
    config: EngineConfig,
    base_rng: GameRng,
    games_started: AtomicU64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl SessionRegistry {
    /// Create an empty registry.
    ///
    /// Shuffles derive from `config.seed`, or from an OS-random seed when
    /// none is set.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let base_rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self {
            sessions: DashMap::new(),
            config,
            base_rng,
            games_started: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a new game in `room_id`, replacing any game already there.
    pub fn create_session(
        &self,
        room_id: RoomId,
        roster: Vec<PlayerInfo>,
    ) -> Result<Broadcast, EngineError> {
        let game_no = self.games_started.fetch_add(1, Ordering::Relaxed) + 1;
        let mut rng = self.base_rng.for_game(&room_id, game_no);
        let session = GameSession::new(room_id.clone(), roster, &self.config, &mut rng)?;
        let broadcast = session.broadcast();

        let replaced = self
            .sessions
            .insert(room_id.clone(), Arc::new(Mutex::new(session)))
            .is_some();
        info!(room = %room_id, game_no, replaced, "Session created");

        Ok(broadcast)
    }

    pub fn draw_tile(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        source: PileKind,
    ) -> Result<Broadcast, EngineError> {
        self.mutate(room_id, |s| s.draw_tile(player_id, source).map(drop))
    }

    pub fn discard_tile(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        tile_id: TileId,
    ) -> Result<Broadcast, EngineError> {
        self.mutate(room_id, |s| s.discard_tile(player_id, tile_id).map(drop))
    }

    pub fn declare_win(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        discard: Option<TileId>,
    ) -> Result<Broadcast, EngineError> {
        self.mutate(room_id, |s| s.declare_win(player_id, discard))
    }

    /// Apply a move received from the transport layer.
    pub fn apply(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        action: Move,
    ) -> Result<Broadcast, EngineError> {
        match action {
            Move::Draw { source } => self.draw_tile(room_id, player_id, source),
            Move::Discard { tile } => self.discard_tile(room_id, player_id, tile),
            Move::DeclareWin { discard } => self.declare_win(room_id, player_id, discard),
        }
    }

    /// State of `room_id` as `viewer` may see it; `None` sees everything.
    pub fn get_redacted_state(
        &self,
        room_id: &RoomId,
        viewer: Option<&PlayerId>,
    ) -> Result<SessionSnapshot, EngineError> {
        self.with_session(room_id, |s| s.snapshot(viewer))
    }

    /// Drop the session for `room_id`. Returns whether one existed.
    pub fn remove_session(&self, room_id: &RoomId) -> bool {
        let removed = self.sessions.remove(room_id).is_some();
        if removed {
            info!(room = %room_id, "Session removed");
        }
        removed
    }

    /// Run `f` on the session under its room lock.
    pub fn with_session<R>(
        &self,
        room_id: &RoomId,
        f: impl FnOnce(&GameSession) -> R,
    ) -> Result<R, EngineError> {
        let handle = self.handle(room_id)?;
        let session = handle.lock();
        Ok(f(&session))
    }

    #[must_use]
    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.sessions.contains_key(room_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Rooms with a live session, in no particular order.
    #[must_use]
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }

    fn handle(&self, room_id: &RoomId) -> Result<SessionHandle, EngineError> {
        self.sessions
            .get(room_id)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| EngineError::SessionNotFound(room_id.clone()))
    }

    fn mutate(
        &self,
        room_id: &RoomId,
        op: impl FnOnce(&mut GameSession) -> Result<(), EngineError>,
    ) -> Result<Broadcast, EngineError> {
        let handle = self.handle(room_id)?;
        let mut session = handle.lock();
        op(&mut session)?;
        Ok(session.broadcast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorKind, Seat};
    use crate::session::SessionStatus;

    fn roster() -> Vec<PlayerInfo> {
        vec![PlayerInfo::new("p1", "One"), PlayerInfo::new("p2", "Two")]
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::new(EngineConfig::default().with_seed(5)).unwrap()
    }

    #[test]
    fn test_create_and_lookup() {
        let registry = registry();
        let room = RoomId::new("a");
        let broadcast = registry.create_session(room.clone(), roster()).unwrap();

        assert_eq!(broadcast.len(), 2);
        assert!(registry.contains(&room));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.room_ids(), vec![room.clone()]);

        let snap = registry.get_redacted_state(&room, None).unwrap();
        assert_eq!(snap.status, SessionStatus::Playing);
    }

    #[test]
    fn test_unknown_room() {
        let registry = registry();
        let room = RoomId::new("missing");

        let err = registry
            .draw_tile(&room, &PlayerId::new("p1"), PileKind::Draw)
            .unwrap_err();
        assert_eq!(err, EngineError::SessionNotFound(room.clone()));
        assert_eq!(
            registry.get_redacted_state(&room, None).unwrap_err().kind(),
            ErrorKind::SessionNotFound
        );
        assert!(!registry.remove_session(&room));
    }

    #[test]
    fn test_restart_deals_a_new_game() {
        let registry = registry();
        let room = RoomId::new("a");

        registry.create_session(room.clone(), roster()).unwrap();
        let first = registry.get_redacted_state(&room, None).unwrap();
        registry.create_session(room.clone(), roster()).unwrap();
        let second = registry.get_redacted_state(&room, None).unwrap();

        assert_eq!(registry.len(), 1);
        assert_ne!(first.players, second.players);
    }

    #[test]
    fn test_apply_dispatches_moves() {
        let registry = registry();
        let room = RoomId::new("a");
        let p1 = PlayerId::new("p1");
        registry.create_session(room.clone(), roster()).unwrap();

        let broadcast = registry
            .apply(&room, &p1, Move::Draw { source: PileKind::Draw })
            .unwrap();
        let hand = broadcast.for_player(&p1).unwrap().player(&p1).unwrap().hand.clone();
        let tile = hand.unwrap()[0].id();

        let broadcast = registry.apply(&room, &p1, Move::Discard { tile }).unwrap();
        let view = broadcast.for_player(&p1).unwrap();
        assert_eq!(view.current_player_index, Seat::new(1));
        assert_eq!(view.top_discard.map(|t| t.id()), Some(tile));
    }

    #[test]
    fn test_remove_session() {
        let registry = registry();
        let room = RoomId::new("a");
        registry.create_session(room.clone(), roster()).unwrap();

        assert!(registry.remove_session(&room));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_player_range(3, 2);
        assert_eq!(
            SessionRegistry::new(config).unwrap_err().kind(),
            ErrorKind::InvalidRoster
        );
    }

    #[test]
    fn test_concurrent_discards_one_wins() {
        let registry = registry();
        let room = RoomId::new("race");
        let p1 = PlayerId::new("p1");
        registry.create_session(room.clone(), roster()).unwrap();
        registry.draw_tile(&room, &p1, PileKind::Draw).unwrap();

        let hand: Vec<TileId> = registry
            .with_session(&room, |s| s.player(&p1).unwrap().hand().iter().map(|t| t.id()).collect())
            .unwrap();

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = hand
                .iter()
                .take(8)
                .map(|&tile| {
                    let registry = &registry;
                    let (room, p1) = (&room, &p1);
                    scope.spawn(move || registry.discard_tile(room, p1, tile))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.kind() == ErrorKind::NotPlayersTurn));
        registry
            .with_session(&room, |s| {
                assert_eq!(s.discard_pile().len(), 1);
                assert_eq!(s.player(&p1).unwrap().hand_size(), 14);
                assert!(s.check_conservation());
            })
            .unwrap();
    }
}
