//! One room's game: the authoritative turn state machine.
//!
//! ## Turn flow
//!
//! Each turn the current player draws one tile (from either pile) and then
//! discards one. The discard passes the turn to the next seat, whose
//! per-turn flags are cleared. A win may be declared by any seated player
//! while the game is playing, independent of whose turn it is.
//!
//! ## Failure
//!
//! Every operation validates fully before touching state. A returned error
//! means the session is exactly as it was before the call.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::core::{
    EngineConfig, EngineError, GameRng, Move, MoveRecord, Player, PlayerId, PlayerInfo,
    PlayerMap, RoomId, Seat,
};
use crate::rules::HandValidator;
use crate::tiles::{
    build_set, lay_out, shuffle, Indicator, Joker, Pile, PileKind, Tile, TileId, FULL_SET_SIZE,
};

/// Whether moves are still accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Playing,
    /// Terminal. A winner has been recorded.
    Finished,
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameSession {
    room_id: RoomId,
    players: PlayerMap<Player>,
    draw_pile: Pile,
    discard_pile: Pile,
    indicator: Indicator,
    current: Seat,
    turn_counter: u32,
    status: SessionStatus,
    winner: Option<PlayerId>,
    validator: HandValidator,
    started_at: OffsetDateTime,
    history: Vector<MoveRecord>,
}

impl GameSession {
    /// Shuffle a fresh tile set and deal it to `roster`.
    pub fn new(
        room_id: RoomId,
        roster: Vec<PlayerInfo>,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> Result<Self, EngineError> {
        let shuffled = shuffle(&build_set(), rng);
        Self::from_shuffled(room_id, roster, shuffled, config)
    }

    /// Deal a session from tiles already in their final order.
    ///
    /// The last tile becomes the indicator and hands are dealt from the end,
    /// so the same order always produces the same table. `shuffled` must be
    /// a reordering of [`build_set`]: every id once, faces as built, no
    /// wildcard flags yet.
    pub fn from_shuffled(
        room_id: RoomId,
        roster: Vec<PlayerInfo>,
        shuffled: Vec<Tile>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        config.check_player_count(roster.len())?;

        check_unique(&roster)?;
        check_tile_set(&shuffled)?;

        let layout = lay_out(shuffled, roster.len(), config.tiles_per_player)?;

        let players = PlayerMap::from_vec(
            roster
                .into_iter()
                .zip(layout.hands)
                .map(|(info, hand)| {
                    let mut player = Player::new(info);
                    player.set_hand(hand);
                    player
                })
                .collect(),
        );

        info!(
            room = %room_id,
            players = players.player_count(),
            indicator = %layout.indicator.tile,
            "Game initialized"
        );

        Ok(Self {
            room_id,
            players,
            draw_pile: layout.draw_pile,
            discard_pile: Pile::new(),
            indicator: layout.indicator,
            current: Seat::new(0),
            turn_counter: 0,
            status: SessionStatus::Playing,
            winner: None,
            validator: HandValidator::new(config.tiles_per_player),
            started_at: OffsetDateTime::now_utc(),
            history: Vector::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Seat of `player_id`, if they are in this game.
    #[must_use]
    pub fn seat_of(&self, player_id: &PlayerId) -> Option<Seat> {
        self.players.position(|p| &p.id == player_id)
    }

    #[must_use]
    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.seat_of(player_id).map(|seat| &self.players[seat])
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Pile {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Pile {
        &self.discard_pile
    }

    #[must_use]
    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    #[must_use]
    pub fn joker(&self) -> &Joker {
        &self.indicator.joker
    }

    #[must_use]
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Completed turns; one per discard.
    #[must_use]
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    /// Successful moves in the order they were made.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// When the tiles were dealt.
    #[must_use]
    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    /// Does every tile of the set exist exactly once across hands, piles
    /// and the indicator?
    #[must_use]
    pub fn check_conservation(&self) -> bool {
        let mut seen = FxHashSet::default();
        let all_once = self
            .players
            .values()
            .flat_map(|p| p.hand().iter())
            .chain(self.draw_pile.as_slice())
            .chain(self.discard_pile.as_slice())
            .chain(std::iter::once(&self.indicator.tile))
            .all(|t| seen.insert(t.id()));
        all_once && seen.len() == FULL_SET_SIZE
    }

    // === Moves ===

    /// Take the top tile of `source` into `player_id`'s hand.
    pub fn draw_tile(
        &mut self,
        player_id: &PlayerId,
        source: PileKind,
    ) -> Result<Tile, EngineError> {
        self.ensure_playing()?;
        let seat = self.seat(player_id)?;
        if seat != self.current {
            return Err(EngineError::NotPlayersTurn(player_id.clone()));
        }
        if self.players[seat].has_drawn_this_turn {
            return Err(EngineError::AlreadyDrawn(player_id.clone()));
        }

        let pile = match source {
            PileKind::Draw => &mut self.draw_pile,
            PileKind::Discard => &mut self.discard_pile,
        };
        let tile = pile.pop().ok_or(EngineError::PileEmpty(source))?;

        let player = &mut self.players[seat];
        player.add_tile(tile);
        player.has_drawn_this_turn = true;

        debug!(
            room = %self.room_id,
            player = %player_id,
            %source,
            hand_size = player.hand_size(),
            "Tile drawn"
        );
        self.record(seat, player_id, Move::Draw { source });

        Ok(tile)
    }

    /// Move `tile_id` from `player_id`'s hand onto the discard pile and pass
    /// the turn.
    pub fn discard_tile(
        &mut self,
        player_id: &PlayerId,
        tile_id: TileId,
    ) -> Result<Tile, EngineError> {
        self.ensure_playing()?;
        let seat = self.seat(player_id)?;
        if seat != self.current {
            return Err(EngineError::NotPlayersTurn(player_id.clone()));
        }

        let player = &mut self.players[seat];
        if !player.has_drawn_this_turn {
            return Err(EngineError::MustDrawBeforeDiscard(player_id.clone()));
        }
        if player.has_discarded_this_turn {
            return Err(EngineError::AlreadyDiscarded(player_id.clone()));
        }
        let tile = player
            .remove_tile(tile_id)
            .ok_or_else(|| EngineError::TileNotInHand {
                player: player_id.clone(),
                tile: tile_id,
            })?;
        player.has_discarded_this_turn = true;
        self.discard_pile.push(tile);

        debug!(room = %self.room_id, player = %player_id, tile = %tile_id, "Tile discarded");
        self.record(seat, player_id, Move::Discard { tile: tile_id });
        self.advance_turn();

        Ok(tile)
    }

    /// Claim a win with the hand `player_id` would hold after discarding
    /// `discard`, if given.
    ///
    /// Allowed at any point while the game is playing, not only on the
    /// declaring player's own turn.
    pub fn declare_win(
        &mut self,
        player_id: &PlayerId,
        discard: Option<TileId>,
    ) -> Result<(), EngineError> {
        self.ensure_playing()?;
        let seat = self.seat(player_id)?;
        let player = &self.players[seat];

        let candidate = match discard {
            Some(tile_id) => {
                if !player.has_tile(tile_id) {
                    return Err(EngineError::TileNotInHand {
                        player: player_id.clone(),
                        tile: tile_id,
                    });
                }
                player.hand_without(tile_id)
            }
            None => player.hand().to_vec(),
        };

        let expected = self.validator.hand_size();
        if candidate.len() != expected {
            warn!(
                room = %self.room_id,
                player = %player_id,
                hand_size = candidate.len(),
                "Declaration with wrong hand size"
            );
            return Err(EngineError::InvalidHandSize {
                expected,
                actual: candidate.len(),
            });
        }
        if !self.validator.is_winning_hand(&candidate) {
            warn!(room = %self.room_id, player = %player_id, "Declaration rejected");
            return Err(EngineError::InvalidPartition(player_id.clone()));
        }

        let player = &mut self.players[seat];
        if let Some(tile) = discard.and_then(|id| player.remove_tile(id)) {
            self.discard_pile.push(tile);
        }
        self.status = SessionStatus::Finished;
        self.winner = Some(player_id.clone());

        info!(room = %self.room_id, player = %player_id, "Player won the game");
        self.record(seat, player_id, Move::DeclareWin { discard });

        Ok(())
    }

    // === Internals ===

    fn ensure_playing(&self) -> Result<(), EngineError> {
        match self.status {
            SessionStatus::Playing => Ok(()),
            SessionStatus::Finished => Err(EngineError::SessionFinished(self.room_id.clone())),
        }
    }

    fn seat(&self, player_id: &PlayerId) -> Result<Seat, EngineError> {
        self.seat_of(player_id)
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.clone()))
    }

    fn advance_turn(&mut self) {
        self.current = self.current.next(self.players.player_count());
        self.turn_counter += 1;
        self.players[self.current].reset_turn();
    }

    fn record(&mut self, seat: Seat, player_id: &PlayerId, action: Move) {
        self.history.push_back(MoveRecord::new(
            seat,
            player_id.clone(),
            action,
            self.turn_counter,
        ));
    }
}

fn check_unique(roster: &[PlayerInfo]) -> Result<(), EngineError> {
    let mut seen = FxHashSet::default();
    match roster.iter().find(|p| !seen.insert(&p.id)) {
        Some(dup) => Err(EngineError::InvalidRoster(format!(
            "player {} is listed twice",
            dup.id
        ))),
        None => Ok(()),
    }
}

/// Reject anything but a reordering of the unmarked standard set.
fn check_tile_set(tiles: &[Tile]) -> Result<(), EngineError> {
    if tiles.len() != FULL_SET_SIZE {
        return Err(EngineError::InvalidTileSet(format!(
            "{} tiles, expected {FULL_SET_SIZE}",
            tiles.len()
        )));
    }
    if let Some(tile) = tiles.iter().find(|t| t.is_wildcard()) {
        return Err(EngineError::InvalidTileSet(format!(
            "{} is already marked wild",
            tile.id()
        )));
    }

    let mut by_id = tiles.to_vec();
    by_id.sort_unstable_by_key(|t| t.id());
    if let Some(pair) = by_id.windows(2).find(|w| w[0].id() == w[1].id()) {
        return Err(EngineError::InvalidTileSet(format!(
            "{} appears twice",
            pair[0].id()
        )));
    }
    match by_id.iter().zip(build_set()).find(|(got, want)| **got != *want) {
        Some((got, _)) => Err(EngineError::InvalidTileSet(format!(
            "{} does not carry its standard face",
            got.id()
        ))),
        None => Ok(()),
    }
}
