//! Core battle engine (no_std compatible)
//!
//! Pure domain rules: geometry, weapons, vessels, battlefields and the game
//! aggregate. Nothing in here performs I/O or locking; the async engine in
//! `crate::engine` wraps these types with persistence and concurrency.

pub mod battlefield;
pub mod common;
pub mod config;
pub mod game;
pub mod geometry;
pub mod player;
pub mod vessel;
pub mod weapon;

pub use battlefield::{default_capacity, Battlefield};
pub use common::{EngineError, ShotResult};
pub use config::*;
pub use game::{Game, GameId, GameStatus, MatchStatus, MAX_PLAYERS};
pub use geometry::{Bounds, Position};
pub use player::{Player, PlayerId};
pub use vessel::{Vessel, VesselId, VesselKind};
pub use weapon::{Weapon, WeaponKind};
