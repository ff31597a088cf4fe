//! The game aggregate: roster, placement orchestration, shots and status.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::num::NonZeroUsize;

use crate::core::battlefield::Battlefield;
use crate::core::common::{EngineError, ShotResult};
use crate::core::geometry::{Bounds, Position};
use crate::core::player::{Player, PlayerId};
use crate::core::vessel::{Vessel, VesselId, VesselKind};

/// Maximum number of players in one game.
pub const MAX_PLAYERS: usize = 2;

/// Identifier handed out by the store when a game is first saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Status of the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStatus {
    InProgress,
    Player1Won,
    Player2Won,
}

/// Up to two players whose battlefields share the same bounds.
///
/// Status is never stored; it is derived from the battlefields on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    id: Option<GameId>,
    players: Vec<Player>,
}

impl Game {
    /// New unsaved game with `player1_name` on a fresh battlefield.
    pub fn create(
        player1_name: impl Into<String>,
        bounds: Bounds,
        max_vessel_capacity: NonZeroUsize,
    ) -> Result<Self, EngineError> {
        let battlefield = Battlefield::new(bounds, max_vessel_capacity)?;
        let mut players = Vec::with_capacity(MAX_PLAYERS);
        players.push(Player::new(PlayerId(1), player1_name, battlefield));
        Ok(Self { id: None, players })
    }

    /// The same game tagged with the id the store assigned.
    pub fn with_id(mut self, id: GameId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<GameId> {
        self.id
    }

    /// Players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// The other seat, if someone has taken it.
    pub fn opponent_of(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() != name)
    }

    fn index_of(&self, name: &str) -> Result<usize, EngineError> {
        self.players
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| EngineError::PlayerNotFound(name.to_string()))
    }

    /// Seat a second player on a battlefield mirroring player 1's.
    pub fn join(&mut self, player2_name: impl Into<String>) -> Result<PlayerId, EngineError> {
        if self.is_full() {
            return Err(EngineError::GameFull);
        }
        let name = player2_name.into();
        if self.player(&name).is_some() {
            return Err(EngineError::NameTaken(name));
        }
        let battlefield = match self.players.first() {
            Some(creator) => creator.battlefield().mirrored(),
            None => return Err(EngineError::PlayerNotFound(name)),
        };
        let id = PlayerId(self.players.len() as u8 + 1);
        self.players.push(Player::new(id, name, battlefield));
        Ok(id)
    }

    /// Place a default-equipped vessel of `kind` on `player_name`'s battlefield.
    pub fn add_vessel(
        &mut self,
        player_name: &str,
        kind: VesselKind,
        position: Position,
    ) -> Result<VesselId, EngineError> {
        let idx = self.index_of(player_name)?;
        self.players[idx]
            .battlefield_mut()
            .place_vessel(Vessel::new(kind, position))
    }

    /// Resolve one shot from `shooter_name`'s vessel `vessel_id` at `target`.
    ///
    /// The vessel must be able to fire: a wreck or an empty weapon is
    /// reported as [`EngineError::VesselNotFoundOrDisabled`].
    ///
    /// An empty aimed cell, including one outside the opponent's bounds, is a
    /// legal shot that spends a round and reports [`ShotResult::Miss`].
    pub fn shoot_at(
        &mut self,
        shooter_name: &str,
        vessel_id: VesselId,
        target: Position,
    ) -> Result<ShotResult, EngineError> {
        let idx = self.index_of(shooter_name)?;
        let (shooter, opponent) = self.split_seats_mut(idx);

        let vessel = shooter
            .battlefield_mut()
            .vessel_mut(vessel_id)
            .filter(|v| v.can_fire())
            .ok_or(EngineError::VesselNotFoundOrDisabled(vessel_id))?;

        let aimed = opponent.and_then(|p| p.battlefield_mut().vessel_at_mut(&target));
        vessel.fire_at(aimed, target)
    }

    /// Shooter seat and the other seat, if taken. `idx` must be a valid seat.
    fn split_seats_mut(&mut self, idx: usize) -> (&mut Player, Option<&mut Player>) {
        let (head, tail) = self.players.split_at_mut(1);
        if idx == 0 {
            (&mut head[0], tail.first_mut())
        } else {
            (&mut tail[0], Some(&mut head[0]))
        }
    }

    /// Status seen by `player_name`.
    ///
    /// Unknown players see `InProgress` rather than an error.
    pub fn status_for(&self, player_name: &str) -> GameStatus {
        let Some(player) = self.player(player_name) else {
            return GameStatus::InProgress;
        };
        if player.battlefield().all_vessels_destroyed() {
            return GameStatus::Lost;
        }
        match self.opponent_of(player_name) {
            Some(opp) if opp.battlefield().all_vessels_destroyed() => GameStatus::Won,
            _ => GameStatus::InProgress,
        }
    }

    pub fn match_status(&self) -> MatchStatus {
        let destroyed = |seat: usize| {
            self.players
                .get(seat)
                .is_some_and(|p| p.battlefield().all_vessels_destroyed())
        };
        match (destroyed(0), destroyed(1)) {
            (false, true) => MatchStatus::Player1Won,
            (true, false) => MatchStatus::Player2Won,
            _ => MatchStatus::InProgress,
        }
    }

    /// Re-check roster and battlefield invariants on decoded state.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.players.len() > MAX_PLAYERS {
            return Err(EngineError::GameFull);
        }
        let Some(creator) = self.players.first() else {
            return Err(EngineError::PlayerNotFound(String::new()));
        };
        let bounds = *creator.battlefield().bounds();
        for (i, p) in self.players.iter().enumerate() {
            if p.id() != PlayerId(i as u8 + 1) {
                return Err(EngineError::PlayerNotFound(p.name().to_string()));
            }
            if *p.battlefield().bounds() != bounds {
                return Err(EngineError::InvalidBounds(*p.battlefield().bounds()));
            }
            if self.players[..i].iter().any(|o| o.name() == p.name()) {
                return Err(EngineError::NameTaken(p.name().to_string()));
            }
            p.battlefield().validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::battlefield::default_capacity;

    fn two_player_game() -> Game {
        let bounds = Bounds::new(0, 5, 0, 5, 0, 0).unwrap();
        let mut game = Game::create("Alice", bounds, default_capacity()).unwrap();
        game.join("Bob").unwrap();
        game
    }

    #[test]
    fn join_mirrors_bounds_and_capacity() {
        let bounds = Bounds::new(-3, 3, 0, 9, -1, 1).unwrap();
        let mut game = Game::create("Alice", bounds, NonZeroUsize::new(2).unwrap()).unwrap();
        assert_eq!(game.join("Bob"), Ok(PlayerId(2)));
        let bob = game.player("Bob").unwrap();
        assert_eq!(*bob.battlefield().bounds(), bounds);
        assert_eq!(bob.battlefield().max_vessel_capacity(), 2);
        assert!(game.validate().is_ok());
    }

    #[test]
    fn join_with_creator_name_is_rejected() {
        let bounds = Bounds::new(0, 1, 0, 1, 0, 0).unwrap();
        let mut game = Game::create("Alice", bounds, default_capacity()).unwrap();
        assert_eq!(
            game.join("Alice"),
            Err(EngineError::NameTaken("Alice".into()))
        );
    }

    #[test]
    fn shot_before_opponent_joins_is_a_miss() {
        let bounds = Bounds::new(0, 5, 0, 5, 0, 0).unwrap();
        let mut game = Game::create("Alice", bounds, default_capacity()).unwrap();
        let id = game
            .add_vessel("Alice", VesselKind::Frigate, Position::new(0, 0, 0))
            .unwrap();
        assert_eq!(
            game.shoot_at("Alice", id, Position::new(1, 1, 0)),
            Ok(ShotResult::Miss)
        );
    }

    #[test]
    fn match_status_tracks_destroyed_side() {
        let mut game = two_player_game();
        assert_eq!(game.match_status(), MatchStatus::InProgress);
        game.add_vessel("Alice", VesselKind::Aircraft, Position::new(1, 1, 0))
            .unwrap();
        let bob_gun = game
            .add_vessel("Bob", VesselKind::Frigate, Position::new(0, 0, 0))
            .unwrap();
        assert_eq!(
            game.shoot_at("Bob", bob_gun, Position::new(1, 1, 0)),
            Ok(ShotResult::Sunk(VesselKind::Aircraft))
        );
        assert_eq!(game.match_status(), MatchStatus::Player2Won);
        assert_eq!(game.status_for("Alice"), GameStatus::Lost);
        assert_eq!(game.status_for("Bob"), GameStatus::Won);
    }

    #[test]
    fn empty_weapon_cannot_be_selected() {
        let mut game = two_player_game();
        let aircraft = game
            .add_vessel("Alice", VesselKind::Aircraft, Position::new(0, 0, 0))
            .unwrap();
        for _ in 0..20 {
            game.shoot_at("Alice", aircraft, Position::new(2, 2, 0)).unwrap();
        }
        let before = game.clone();
        assert_eq!(
            game.shoot_at("Alice", aircraft, Position::new(2, 2, 0)),
            Err(EngineError::VesselNotFoundOrDisabled(aircraft))
        );
        assert_eq!(game, before);
    }
}
