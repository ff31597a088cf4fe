//! Request/response messages exchanged between a client and the server.

use crate::core::{
    Bounds, EngineError, Game, GameId, GameStatus, PlayerId, Position, ShotResult, VesselId,
    VesselKind,
};

/// Current protocol version, checked during the handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// Stable wire code for each engine error kind.
///
/// 1xx: something referenced does not exist. 2xx: a game rule refused the
/// request. 5xx: the server could not complete the request right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    GameNotFound = 100,
    PlayerNotFound = 101,
    VesselNotFoundOrDisabled = 102,
    InvalidBounds = 200,
    OutOfBounds = 201,
    CapacityExceeded = 202,
    PositionOccupied = 203,
    OutOfRange = 204,
    WeaponDepleted = 205,
    GameFull = 206,
    NameTaken = 207,
    GameBusy = 500,
    Storage = 501,
    /// Malformed or out-of-order request.
    BadRequest = 400,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn is_not_found(self) -> bool {
        (100..200).contains(&self.as_u16())
    }

    pub fn is_rule_violation(self) -> bool {
        (200..300).contains(&self.as_u16())
    }
}

impl From<&EngineError> for ErrorCode {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::GameNotFound(_) => ErrorCode::GameNotFound,
            EngineError::PlayerNotFound(_) => ErrorCode::PlayerNotFound,
            EngineError::VesselNotFoundOrDisabled(_) => ErrorCode::VesselNotFoundOrDisabled,
            EngineError::InvalidBounds(_) => ErrorCode::InvalidBounds,
            EngineError::OutOfBounds(_) => ErrorCode::OutOfBounds,
            EngineError::CapacityExceeded(_) => ErrorCode::CapacityExceeded,
            EngineError::PositionOccupied(_) => ErrorCode::PositionOccupied,
            EngineError::OutOfRange { .. } => ErrorCode::OutOfRange,
            EngineError::WeaponDepleted(_) => ErrorCode::WeaponDepleted,
            EngineError::GameFull => ErrorCode::GameFull,
            EngineError::NameTaken(_) => ErrorCode::NameTaken,
            EngineError::GameBusy(_) => ErrorCode::GameBusy,
            EngineError::Storage(_) => ErrorCode::Storage,
        }
    }
}

/// Raw axis limits as sent by clients; validated into [`Bounds`] server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundsSpec {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl BoundsSpec {
    pub fn to_bounds(self) -> Result<Bounds, EngineError> {
        Bounds::new(
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z,
        )
    }
}

/// Messages exchanged between a [`crate::Client`] and a [`crate::Server`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// Opening handshake carrying the sender's protocol version.
    Hello { version: u32 },
    /// Server's answer to `Hello`.
    HelloAck { version: u32 },

    CreateGame {
        player_name: String,
        bounds: BoundsSpec,
        /// `None` uses the server's default capacity.
        max_vessel_capacity: Option<u32>,
    },
    JoinGame { game_id: GameId, player_name: String },
    AddVessel {
        game_id: GameId,
        player_name: String,
        kind: VesselKind,
        position: Position,
    },
    ShootAt {
        game_id: GameId,
        shooter_name: String,
        vessel_id: VesselId,
        target: Position,
    },
    GetStatus { game_id: GameId, player_name: String },
    GetGame { game_id: GameId },

    GameCreated(GameId),
    Joined(PlayerId),
    VesselAdded(VesselId),
    Shot(ShotResult),
    Status(GameStatus),
    GameSnapshot(Game),
    /// Request failed; `code` is stable, `message` is for humans.
    Error { code: ErrorCode, message: String },
}

impl Message {
    pub fn error(err: &EngineError) -> Self {
        Message::Error {
            code: ErrorCode::from(err),
            message: err.to_string(),
        }
    }
}
