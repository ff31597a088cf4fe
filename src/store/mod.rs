//! Persistence collaborator for the battle engine.
//!
//! The engine only talks to a [`GameStore`]; which one is used, and when it
//! is opened or closed, is up to the caller.

use crate::core::{Game, GameId};

pub mod codec;
pub mod file;
pub mod in_memory;

pub use file::FileStore;
pub use in_memory::InMemoryStore;

/// Durable home of games between engine operations.
///
/// Implementations need not be transactional across games. `load` must
/// return a fully formed snapshot, never a partially written one.
#[async_trait::async_trait]
pub trait GameStore: Send + Sync {
    /// Persist a new game and return the id assigned to it.
    async fn save(&self, game: Game) -> anyhow::Result<GameId>;
    /// Fetch a snapshot, `None` if the id is unknown.
    async fn load(&self, id: GameId) -> anyhow::Result<Option<Game>>;
    /// Overwrite an existing game. Fails if it was never saved.
    async fn update(&self, game: &Game) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl<S: GameStore + ?Sized> GameStore for std::sync::Arc<S> {
    async fn save(&self, game: Game) -> anyhow::Result<GameId> {
        (**self).save(game).await
    }

    async fn load(&self, id: GameId) -> anyhow::Result<Option<Game>> {
        (**self).load(id).await
    }

    async fn update(&self, game: &Game) -> anyhow::Result<()> {
        (**self).update(game).await
    }
}
