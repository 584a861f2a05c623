//! Redacted views of a session for broadcasting.
//!
//! A viewer sees their own hand in full and only the size of everybody
//! else's. Once the game is finished every hand is revealed. A view with no
//! viewer is omniscient.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::game::{GameSession, SessionStatus};
use crate::core::{Player, PlayerId, RoomId, Seat};
use crate::tiles::{Joker, Tile};

/// One seat as seen by a viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub display_name: String,
    pub hand_size: usize,
    /// Present only when the viewer may see this hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Tile>>,
    pub score: i64,
    pub has_drawn_this_turn: bool,
    pub has_discarded_this_turn: bool,
}

impl PlayerView {
    fn new(player: &Player, reveal: bool) -> Self {
        Self {
            id: player.id.clone(),
            display_name: player.display_name.clone(),
            hand_size: player.hand_size(),
            hand: reveal.then(|| player.hand().to_vec()),
            score: player.score,
            has_drawn_this_turn: player.has_drawn_this_turn,
            has_discarded_this_turn: player.has_discarded_this_turn,
        }
    }
}

/// Session state as one viewer is allowed to see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub room_id: RoomId,
    pub players: Vec<PlayerView>,
    pub draw_pile_size: usize,
    /// Bottom first.
    pub discard_pile: Vec<Tile>,
    pub top_discard: Option<Tile>,
    pub indicator: Tile,
    pub joker: Joker,
    pub current_player_id: PlayerId,
    pub current_player_index: Seat,
    pub turn_counter: u32,
    pub status: SessionStatus,
    pub winner: Option<PlayerId>,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
}

impl SessionSnapshot {
    /// Render `session` for `viewer`; `None` reveals everything.
    #[must_use]
    pub fn new(session: &GameSession, viewer: Option<&PlayerId>) -> Self {
        let finished = session.is_finished();
        let players = session
            .players()
            .values()
            .map(|p| {
                let reveal = finished || viewer.map_or(true, |v| v == &p.id);
                PlayerView::new(p, reveal)
            })
            .collect();

        Self {
            room_id: session.room_id().clone(),
            players,
            draw_pile_size: session.draw_pile().len(),
            discard_pile: session.discard_pile().as_slice().to_vec(),
            top_discard: session.discard_pile().top().copied(),
            indicator: session.indicator().tile,
            joker: *session.joker(),
            current_player_id: session.current_player().id.clone(),
            current_player_index: session.current_seat(),
            turn_counter: session.turn_counter(),
            status: session.status(),
            winner: session.winner().cloned(),
            started_at: session.started_at(),
        }
    }

    /// The view of one seat, by player id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One snapshot per seated player, ready for the transport layer to send.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub room_id: RoomId,
    pub views: Vec<(PlayerId, SessionSnapshot)>,
}

impl Broadcast {
    #[must_use]
    pub fn for_player(&self, id: &PlayerId) -> Option<&SessionSnapshot> {
        self.views.iter().find(|(p, _)| p == id).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &SessionSnapshot)> {
        self.views.iter().map(|(p, s)| (p, s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl GameSession {
    /// Redacted state for `viewer`, or the full state for `None`.
    #[must_use]
    pub fn snapshot(&self, viewer: Option<&PlayerId>) -> SessionSnapshot {
        SessionSnapshot::new(self, viewer)
    }

    /// Per-player snapshots to send after a successful move.
    #[must_use]
    pub fn broadcast(&self) -> Broadcast {
        Broadcast {
            room_id: self.room_id().clone(),
            views: self
                .players()
                .values()
                .map(|p| (p.id.clone(), self.snapshot(Some(&p.id))))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, GameRng, PlayerInfo};
    use crate::tiles::PileKind;

    fn session() -> GameSession {
        let roster = vec![
            PlayerInfo::new("ana", "Ana"),
            PlayerInfo::new("ben", "Ben"),
            PlayerInfo::new("cem", "Cem"),
        ];
        let mut rng = GameRng::new(11);
        GameSession::new(RoomId::new("lobby-1"), roster, &EngineConfig::default(), &mut rng)
            .unwrap()
    }

    #[test]
    fn test_viewer_sees_only_own_hand() {
        let game = session();
        let ben = PlayerId::new("ben");
        let snap = game.snapshot(Some(&ben));

        assert_eq!(snap.player(&ben).unwrap().hand.as_ref().map(Vec::len), Some(14));
        let ana = snap.player(&PlayerId::new("ana")).unwrap();
        assert!(ana.hand.is_none());
        assert_eq!(ana.hand_size, 14);
    }

    #[test]
    fn test_omniscient_view() {
        let game = session();
        let snap = game.snapshot(None);
        assert!(snap.players.iter().all(|p| p.hand.is_some()));
        assert_eq!(snap.draw_pile_size, 103 - 42);
        assert_eq!(snap.current_player_id, PlayerId::new("ana"));
        assert_eq!(snap.status, SessionStatus::Playing);
        assert!(snap.top_discard.is_none());
    }

    #[test]
    fn test_top_discard_tracks_pile() {
        let mut game = session();
        let ana = PlayerId::new("ana");
        let tile = game.draw_tile(&ana, PileKind::Draw).unwrap();
        game.discard_tile(&ana, tile.id()).unwrap();

        let snap = game.snapshot(None);
        assert_eq!(snap.top_discard, Some(tile));
        assert_eq!(snap.discard_pile, vec![tile]);
        assert_eq!(snap.current_player_index, Seat::new(1));
    }

    #[test]
    fn test_broadcast_one_view_per_player() {
        let game = session();
        let broadcast = game.broadcast();

        assert_eq!(broadcast.len(), 3);
        for (id, snap) in broadcast.iter() {
            let revealed: Vec<_> = snap
                .players
                .iter()
                .filter(|p| p.hand.is_some())
                .map(|p| &p.id)
                .collect();
            assert_eq!(revealed, vec![id]);
        }
        assert!(broadcast.for_player(&PlayerId::new("zed")).is_none());
    }

    #[test]
    fn test_json_field_names() {
        let game = session();
        let json = game.snapshot(Some(&PlayerId::new("cem"))).to_json().unwrap();

        assert!(json.contains(r#""roomId":"lobby-1""#));
        assert!(json.contains(r#""drawPileSize":61"#));
        assert!(json.contains(r#""currentPlayerIndex":0"#));
        assert!(json.contains(r#""status":"playing""#));
        assert!(json.contains(r#""hasDrawnThisTurn":false"#));
        assert!(json.contains(r#""startedAt":""#));

        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game.snapshot(Some(&PlayerId::new("cem"))));
    }
}
