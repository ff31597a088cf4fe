//! Common types for the battle engine: error kinds and shot outcomes.

use alloc::string::String;

use crate::core::game::GameId;
use crate::core::geometry::{Bounds, Position};
use crate::core::vessel::{VesselId, VesselKind};

/// Outcome of a shot that passed its preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// No live vessel at the aimed cell.
    Miss,
    /// A vessel was damaged but is still afloat.
    Hit { hit_points_remaining: u32 },
    /// The shot destroyed the vessel, carrying its kind.
    Sunk(VesselKind),
}

impl ShotResult {
    /// `true` for both `Hit` and `Sunk`.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// Every expected, caller-facing failure of an engine operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Some axis has `min > max`.
    #[error("invalid bounds: {0}")]
    InvalidBounds(Bounds),
    /// Position lies outside the battlefield.
    #[error("position {0} is outside the battlefield")]
    OutOfBounds(Position),
    /// Battlefield already holds its maximum number of vessels.
    #[error("battlefield is at capacity ({0} vessels)")]
    CapacityExceeded(usize),
    /// Another vessel already sits on that cell.
    #[error("position {0} is already occupied")]
    PositionOccupied(Position),
    /// No player with that name in the game.
    #[error("player {0:?} not found")]
    PlayerNotFound(String),
    /// Vessel id unknown to the shooter, or the vessel cannot fire.
    #[error("vessel {0} not found or unable to fire")]
    VesselNotFoundOrDisabled(VesselId),
    /// Target is further away than the weapon reaches.
    #[error("target {target} is out of range ({range})")]
    OutOfRange { target: Position, range: u32 },
    /// Weapon has no ammunition left.
    #[error("weapon of vessel {0} is out of ammunition")]
    WeaponDepleted(VesselId),
    /// The game already has two players.
    #[error("game is full")]
    GameFull,
    /// A player with that name is already in the game.
    #[error("player name {0:?} already taken")]
    NameTaken(String),
    /// The store has no such game.
    #[error("game {0} not found")]
    GameNotFound(GameId),
    /// The game lock or the store did not answer in time.
    #[error("game {0} is busy")]
    GameBusy(GameId),
    /// The persistence collaborator failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl EngineError {
    /// Whether this error means a referenced entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::GameNotFound(_)
                | EngineError::PlayerNotFound(_)
                | EngineError::VesselNotFoundOrDisabled(_)
        )
    }
}
