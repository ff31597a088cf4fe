//! # War Simulator
//!
//! Turn-based naval battle engine for two players on bounded 3-D
//! battlefields.
//!
//! - [`core`] holds the rules: battlefields, vessels, weapons, shot
//!   resolution and status derivation. It builds without `std`.
//! - [`engine`] serializes mutations per game and talks to a
//!   [`store::GameStore`].
//! - [`protocol`], [`transport`], [`Server`] and [`Client`] expose the
//!   engine's operations to remote callers.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
pub mod engine;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod store;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use client::{Client, ClientError};
#[cfg(feature = "std")]
pub use engine::{BattleEngine, EngineConfig};
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LOG_ENV_VAR};
#[cfg(feature = "std")]
pub use protocol::{BoundsSpec, ErrorCode, Message, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use server::Server;
#[cfg(feature = "std")]
pub use store::{FileStore, GameStore, InMemoryStore};
