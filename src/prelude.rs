//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    Bounds, EngineError, Game, GameId, GameStatus, MatchStatus, Position, ShotResult, VesselId,
    VesselKind,
};
pub use crate::engine::{BattleEngine, EngineConfig};
pub use crate::store::{FileStore, GameStore, InMemoryStore};
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
pub use crate::{Client, Server};
